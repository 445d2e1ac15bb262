use serde::Serialize;

/// Uniform success envelope. `count` rides along on list responses,
/// `message` on mutations; absent fields are omitted from the JSON.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self { success: true, count: None, message: None, data: Some(data) }
    }

    pub fn message(message: &'static str, data: T) -> Self {
        Self { success: true, count: None, message: Some(message), data: Some(data) }
    }
}

impl<T: Serialize> Envelope<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        Self { success: true, count: Some(items.len()), message: None, data: Some(items) }
    }
}
