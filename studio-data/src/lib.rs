mod exporter;

pub use exporter::{ExportError, InquiryExporter, InquiryRecord, PhoneLeadRecord};
