//! Translated interface strings.
//!
//! English and Arabic are bundled; every other locale reads the English
//! table.

use crate::locale::Locale;

/// Keys for interface strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    SiteName,
    NavHome,
    NavFaq,
    NavLogin,
    NavRegister,
    NavDashboard,
    HomeHeading,
    HomeIntro,
    FaqHeading,
    FaqEmpty,
    LoginHeading,
    RegisterHeading,
    EmailLabel,
    PasswordLabel,
    NameLabel,
    LoginSubmit,
    RegisterSubmit,
    DashboardHeading,
    DashboardGreeting,
    Logout,
    ErrorHeading,
    ErrorBody,
    ErrorReload,
    NotFoundHeading,
    NotFoundBody,
    Footer,
}

/// Look up `msg` for `locale`.
pub fn t(locale: Locale, msg: Msg) -> &'static str {
    match locale.as_str() {
        "ar" => arabic(msg),
        _ => english(msg),
    }
}

fn english(msg: Msg) -> &'static str {
    match msg {
        Msg::SiteName => "Watermelon Tours",
        Msg::NavHome => "Home",
        Msg::NavFaq => "FAQ",
        Msg::NavLogin => "Log in",
        Msg::NavRegister => "Register",
        Msg::NavDashboard => "Dashboard",
        Msg::HomeHeading => "Tours led by local guides",
        Msg::HomeIntro => "Small-group tours, day trips and tailored itineraries.",
        Msg::FaqHeading => "Frequently asked questions",
        Msg::FaqEmpty => "No questions have been published yet.",
        Msg::LoginHeading => "Log in to your account",
        Msg::RegisterHeading => "Create an account",
        Msg::EmailLabel => "Email",
        Msg::PasswordLabel => "Password",
        Msg::NameLabel => "Full name",
        Msg::LoginSubmit => "Log in",
        Msg::RegisterSubmit => "Register",
        Msg::DashboardHeading => "Your dashboard",
        Msg::DashboardGreeting => "Signed in as",
        Msg::Logout => "Log out",
        Msg::ErrorHeading => "Something went wrong",
        Msg::ErrorBody => "We could not load this page. Please try again.",
        Msg::ErrorReload => "Reload page",
        Msg::NotFoundHeading => "Page not found",
        Msg::NotFoundBody => "The page you are looking for does not exist.",
        Msg::Footer => "All rights reserved.",
    }
}

fn arabic(msg: Msg) -> &'static str {
    match msg {
        Msg::SiteName => "جولات البطيخ",
        Msg::NavHome => "الرئيسية",
        Msg::NavFaq => "الأسئلة الشائعة",
        Msg::NavLogin => "تسجيل الدخول",
        Msg::NavRegister => "إنشاء حساب",
        Msg::NavDashboard => "لوحة التحكم",
        Msg::HomeHeading => "جولات بقيادة مرشدين محليين",
        Msg::HomeIntro => "جولات لمجموعات صغيرة ورحلات يومية وبرامج حسب الطلب.",
        Msg::FaqHeading => "الأسئلة الشائعة",
        Msg::FaqEmpty => "لم يتم نشر أي أسئلة بعد.",
        Msg::LoginHeading => "سجّل الدخول إلى حسابك",
        Msg::RegisterHeading => "أنشئ حساباً",
        Msg::EmailLabel => "البريد الإلكتروني",
        Msg::PasswordLabel => "كلمة المرور",
        Msg::NameLabel => "الاسم الكامل",
        Msg::LoginSubmit => "دخول",
        Msg::RegisterSubmit => "تسجيل",
        Msg::DashboardHeading => "لوحة التحكم الخاصة بك",
        Msg::DashboardGreeting => "تم تسجيل الدخول باسم",
        Msg::Logout => "تسجيل الخروج",
        Msg::ErrorHeading => "حدث خطأ ما",
        Msg::ErrorBody => "تعذر تحميل هذه الصفحة. يرجى المحاولة مرة أخرى.",
        Msg::ErrorReload => "إعادة تحميل الصفحة",
        Msg::NotFoundHeading => "الصفحة غير موجودة",
        Msg::NotFoundBody => "الصفحة التي تبحث عنها غير موجودة.",
        Msg::Footer => "جميع الحقوق محفوظة.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_locale_reads_english() {
        let fr = Locale::parse("fr").unwrap();
        assert_eq!(t(fr, Msg::NavFaq), "FAQ");
    }

    #[test]
    fn test_arabic_table() {
        let ar = Locale::parse("ar").unwrap();
        assert_eq!(t(ar, Msg::NavHome), "الرئيسية");
    }
}
