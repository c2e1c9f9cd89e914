//! Tower layers applied around every route

pub mod request_tracking;

pub use request_tracking::{
    correlation_id_propagation_layer, request_id_layer, request_id_propagation_layer,
    sensitive_headers_layer, CORRELATION_ID_HEADER, SENSITIVE_HEADERS,
};
