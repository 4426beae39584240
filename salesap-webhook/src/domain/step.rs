use strum::{AsRefStr, Display};

/// The three CRM calls a duplication is made of, in order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum DuplicationStep {
    Fetch,
    Create,
    Link,
}
