pub mod formatter;
pub mod history;
pub mod protocol;

pub mod error {
    pub mod backend_error;
}
