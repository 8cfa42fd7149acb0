pub mod export_document_entity;
pub mod export_fs_adapter;
pub mod export_fs_adapter_trait;
