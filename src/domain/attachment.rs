use std::collections::BTreeMap;

use bytes::Bytes;

/// A file received with a submission, not yet stored anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Files of a request grouped by the form field they arrived under.
#[derive(Debug, Clone, Default)]
pub struct Attachments(BTreeMap<String, Vec<UploadedFile>>);

impl Attachments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, file: UploadedFile) {
        self.0.entry(field.into()).or_default().push(file);
    }

    pub fn get(&self, field: &str) -> Option<&[UploadedFile]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Returns the first file found under the given keys, checked in order.
pub fn select_attachment<'a>(
    attachments: &'a Attachments,
    aliases: &[&str],
) -> Option<&'a UploadedFile> {
    aliases
        .iter()
        .find_map(|alias| attachments.get(alias).and_then(|files| files.first()))
}

/// The two screenshot slots a registration can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentSlot {
    LinkedinScreenshot,
    PaymentScreenshot,
}

impl AttachmentSlot {
    pub const ALL: [AttachmentSlot; 2] = [
        AttachmentSlot::LinkedinScreenshot,
        AttachmentSlot::PaymentScreenshot,
    ];

    /// Form field names accepted for this slot, most specific first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            AttachmentSlot::LinkedinScreenshot => {
                &["linkedin_screenshot", "linkedinScreenshot", "linkedin"]
            }
            AttachmentSlot::PaymentScreenshot => &[
                "payment_screenshot",
                "paymentScreenshot",
                "payment",
                "paymentProof",
            ],
        }
    }

    pub fn select(self, attachments: &Attachments) -> Option<&UploadedFile> {
        select_attachment(attachments, self.aliases())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttachmentSlot::LinkedinScreenshot => "linkedin_screenshot",
            AttachmentSlot::PaymentScreenshot => "payment_screenshot",
        }
    }
}
