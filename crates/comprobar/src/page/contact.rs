//! The storefront's contact / enquiry form.
//!
//! Scenarios fill this form and read values back without submitting, so no
//! run sends enquiries to the shared demo.

use super::{routes, wait_first_contact, PageObject};
use crate::data::ContactForm;
use crate::locator::{Locator, Selector};
use crate::result::ComprobarResult;
use crate::session::Session;

const NAME_INPUT: &str = "#input-name";
const EMAIL_INPUT: &str = "#input-email";
const ENQUIRY_INPUT: &str = "#input-enquiry";

/// Contact form page
#[derive(Debug)]
pub struct ContactPage<'a> {
    session: &'a Session,
    name: Locator<'a>,
    email: Locator<'a>,
    enquiry: Locator<'a>,
}

impl<'a> ContactPage<'a> {
    /// Bind the contact page to a session
    #[must_use]
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            name: Locator::new(session, Selector::css(NAME_INPUT)),
            email: Locator::new(session, Selector::css(EMAIL_INPUT)),
            enquiry: Locator::new(session, Selector::css(ENQUIRY_INPUT)),
        }
    }

    /// Navigate to the contact form and wait until it is usable
    ///
    /// # Errors
    ///
    /// Times out if the form never renders.
    pub async fn open(&self) -> ComprobarResult<()> {
        self.session.goto_route(routes::CONTACT).await?;
        wait_first_contact(self.session).await?;
        self.wait_loaded().await
    }

    /// Fill every field from a form, leaving the page unsubmitted
    ///
    /// # Errors
    ///
    /// Times out if a field never appears.
    pub async fn fill(&self, form: &ContactForm) -> ComprobarResult<()> {
        self.name.fill(&form.name).await?;
        self.email.fill(&form.email).await?;
        self.enquiry.fill(&form.enquiry).await
    }

    /// Replace only the email field
    ///
    /// # Errors
    ///
    /// Times out if the field never appears.
    pub async fn set_email(&self, value: &str) -> ComprobarResult<()> {
        self.email.fill(value).await
    }

    /// Current value of the email field
    ///
    /// # Errors
    ///
    /// Times out if the field never appears.
    pub async fn email_value(&self) -> ComprobarResult<String> {
        self.email.value().await
    }

    /// Current value of the enquiry field
    ///
    /// # Errors
    ///
    /// Times out if the field never appears.
    pub async fn enquiry_value(&self) -> ComprobarResult<String> {
        self.enquiry.value().await
    }
}

impl PageObject for ContactPage<'_> {
    fn page_name(&self) -> &'static str {
        "contact"
    }

    fn ready_selector(&self) -> Selector {
        Selector::css(ENQUIRY_INPUT)
    }

    fn session(&self) -> &Session {
        self.session
    }
}
