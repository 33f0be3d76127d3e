pub mod azure_read_client;

pub use azure_read_client::AzureReadClient;
