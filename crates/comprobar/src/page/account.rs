//! Account pages: login and registration.

use super::{routes, wait_first_contact, PageObject};
use crate::data::RegistrationForm;
use crate::locator::{Locator, Selector};
use crate::result::ComprobarResult;
use crate::session::Session;

const EMAIL_INPUT: &str = "#input-email";
const PASSWORD_INPUT: &str = "#input-password";
const FIRSTNAME_INPUT: &str = "#input-firstname";
const LASTNAME_INPUT: &str = "#input-lastname";
const SUBMIT_BUTTON: &str = "button[type='submit']";
const DANGER_BANNER: &str = ".alert-danger";

/// Customer login page
#[derive(Debug)]
pub struct LoginPage<'a> {
    session: &'a Session,
    email: Locator<'a>,
    password: Locator<'a>,
    submit: Locator<'a>,
    rejection_banner: Locator<'a>,
}

impl<'a> LoginPage<'a> {
    /// Bind the login page to a session
    #[must_use]
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            email: Locator::new(session, Selector::css(EMAIL_INPUT)),
            password: Locator::new(session, Selector::css(PASSWORD_INPUT)),
            submit: Locator::new(
                session,
                Selector::css_with_text(SUBMIT_BUTTON, "Login"),
            ),
            rejection_banner: Locator::new(session, Selector::css(DANGER_BANNER)),
        }
    }

    /// Navigate to the login form and wait until it is usable
    ///
    /// # Errors
    ///
    /// Times out if the form never renders.
    pub async fn open(&self) -> ComprobarResult<()> {
        self.session.goto_route(routes::LOGIN).await?;
        wait_first_contact(self.session).await?;
        self.wait_loaded().await
    }

    /// Submit the login form with these credentials
    ///
    /// # Errors
    ///
    /// Times out if the form controls never appear.
    pub async fn login(&self, email: &str, password: &str) -> ComprobarResult<()> {
        self.email.fill(email).await?;
        self.password.fill(password).await?;
        self.submit.click().await
    }

    /// Wait for the credentials-rejected warning, returning its text
    ///
    /// # Errors
    ///
    /// Times out if the warning never appears.
    pub async fn wait_rejection(&self) -> ComprobarResult<String> {
        self.rejection_banner.text().await
    }
}

impl PageObject for LoginPage<'_> {
    fn page_name(&self) -> &'static str {
        "login"
    }

    fn ready_selector(&self) -> Selector {
        Selector::css(EMAIL_INPUT)
    }

    fn session(&self) -> &Session {
        self.session
    }
}

/// Account registration page.
///
/// Scenarios fill this form and read values back; none of them submit it,
/// so no run leaves an account behind on the shared demo.
#[derive(Debug)]
pub struct RegisterPage<'a> {
    session: &'a Session,
    first_name: Locator<'a>,
    last_name: Locator<'a>,
    email: Locator<'a>,
    password: Locator<'a>,
}

impl<'a> RegisterPage<'a> {
    /// Bind the registration page to a session
    #[must_use]
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            first_name: Locator::new(session, Selector::css(FIRSTNAME_INPUT)),
            last_name: Locator::new(session, Selector::css(LASTNAME_INPUT)),
            email: Locator::new(session, Selector::css(EMAIL_INPUT)),
            password: Locator::new(session, Selector::css(PASSWORD_INPUT)),
        }
    }

    /// Navigate to the registration form and wait until it is usable
    ///
    /// # Errors
    ///
    /// Times out if the form never renders.
    pub async fn open(&self) -> ComprobarResult<()> {
        self.session.goto_route(routes::REGISTER).await?;
        wait_first_contact(self.session).await?;
        self.wait_loaded().await
    }

    /// Fill the identity fields from a form, leaving the page unsubmitted
    ///
    /// # Errors
    ///
    /// Times out if a field never appears.
    pub async fn fill_identity(&self, form: &RegistrationForm) -> ComprobarResult<()> {
        self.first_name.fill(&form.first_name).await?;
        self.last_name.fill(&form.last_name).await?;
        self.email.fill(&form.email).await?;
        self.password.fill(&form.password).await
    }

    /// Replace only the first-name field
    ///
    /// # Errors
    ///
    /// Times out if the field never appears.
    pub async fn set_first_name(&self, value: &str) -> ComprobarResult<()> {
        self.first_name.fill(value).await
    }

    /// Current value of the first-name field
    ///
    /// # Errors
    ///
    /// Times out if the field never appears.
    pub async fn first_name_value(&self) -> ComprobarResult<String> {
        self.first_name.value().await
    }

    /// Replace only the password field
    ///
    /// # Errors
    ///
    /// Times out if the field never appears.
    pub async fn set_password(&self, value: &str) -> ComprobarResult<()> {
        self.password.fill(value).await
    }

    /// Current value of the password field
    ///
    /// # Errors
    ///
    /// Times out if the field never appears.
    pub async fn password_value(&self) -> ComprobarResult<String> {
        self.password.value().await
    }
}

impl PageObject for RegisterPage<'_> {
    fn page_name(&self) -> &'static str {
        "register"
    }

    fn ready_selector(&self) -> Selector {
        Selector::css(FIRSTNAME_INPUT)
    }

    fn session(&self) -> &Session {
        self.session
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_login_submit_narrows_by_label() {
        let selector = Selector::css_with_text(SUBMIT_BUTTON, "Login");
        let query = selector.to_query();
        assert!(query.contains("button[type='submit']"));
        assert!(query.contains("Login"));
    }

    #[test]
    fn test_register_and_login_share_the_email_field_id() {
        assert_eq!(EMAIL_INPUT, "#input-email");
    }
}
