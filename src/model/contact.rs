use serde::{Deserialize, Serialize};

use crate::model::Document;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instagram {
    pub handle: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub instagram: Instagram,
}

impl Document for Contact {
    const FILE_NAME: &'static str = "contact.json";
}
