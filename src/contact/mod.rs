/*!
 * Contact form handling.
 *
 * A submission is validated, persisted as one record, and then forwarded
 * through a `Notifier`. The caller gets a status code and a JSON body:
 * 400 for bad input, 500 when persistence fails, 200 otherwise. A failed
 * notification is logged and recorded but still answers 200.
 */

pub mod form;
pub mod notifier;
pub mod service;

pub use form::{ContactSubmission, ValidSubmission};
pub use notifier::{DisabledNotifier, LogNotifier, Notifier};
pub use service::{ContactService, SubmissionResult};
