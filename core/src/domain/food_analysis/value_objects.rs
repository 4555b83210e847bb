#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodAnalysisInput {
    pub image_data: Vec<u8>,
    pub mime_type: String,
    pub user_context: Option<String>,
}

/// An image that has already been downscaled and re-encoded for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedImage {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}
