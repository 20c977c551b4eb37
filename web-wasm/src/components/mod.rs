pub mod analyze_button;
pub mod contact_form;
pub mod header;
pub mod method_selector;
pub mod result_panel;
pub mod upload_area;
