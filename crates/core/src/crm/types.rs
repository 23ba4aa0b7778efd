//! CRM-side types.

use serde::{Deserialize, Serialize};

/// A CRM lead as far as calling is concerned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    /// Lead identifier as supplied by the caller.
    pub id: String,
    /// Phone numbers on file, in CRM order.
    #[serde(default)]
    pub phones: Vec<LeadPhone>,
}

impl Lead {
    /// The number to dial: the first entry's value, verbatim.
    ///
    /// Returns `None` when there are no phones or the first entry has no
    /// usable value. Later entries are never consulted.
    pub fn primary_phone(&self) -> Option<&str> {
        self.phones
            .first()
            .and_then(|phone| phone.value.as_deref())
            .filter(|value| !value.trim().is_empty())
    }
}

/// One phone entry on a lead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeadPhone {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// CRM label such as "WORK" or "MOBILE".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}
