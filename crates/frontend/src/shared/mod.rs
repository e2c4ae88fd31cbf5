pub mod api_utils;
pub mod dialogs;
pub mod form_controller;
pub mod form_field;
pub mod format;
pub mod http;
pub mod icons;
pub mod modal;
pub mod state;
