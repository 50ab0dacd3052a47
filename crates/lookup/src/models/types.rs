use std::borrow::Cow;

/// Provider identifier - mostly static constants like "BrasilAPI"
pub type ProviderId = Cow<'static, str>;
