use crate::{null_as_default, OWNER_LABEL};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// FunctionRecord one entry of the gateway's system/functions listing.
#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
pub struct FunctionRecord {
    // Name is the name of the function deployment
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String, //`json:"name"`

    // Image is a fully-qualified container image
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String, //`json:"image"`

    // InvocationCount count of invocations
    #[serde(rename = "invocationCount")]
    #[serde(default, deserialize_with = "null_as_default")]
    pub invocation_count: f64, //`json:"invocationCount"`

    // Replicas desired within the cluster
    #[serde(default, deserialize_with = "null_as_default")]
    pub replicas: u64, //`json:"replicas"`

    // Labels are metadata for functions which may be used by the
    // faas_provider or the gateway
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: HashMap<String, String>, //`json:"labels"`

    // Annotations are metadata for functions which may be used by the
    // faas_provider or the gateway
    #[serde(default, deserialize_with = "null_as_default")]
    pub annotations: HashMap<String, String>, //`json:"annotations"`
}

impl FunctionRecord {
    /// the git owner of the function, `None` for functions without an owner label
    /// (system functions such as the pipeline itself)
    pub fn owner(&self) -> Option<&str> {
        self.labels
            .get(OWNER_LABEL)
            .map(String::as_str)
            .filter(|owner| !owner.is_empty())
    }
}
