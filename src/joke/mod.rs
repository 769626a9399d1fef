pub mod api_types;
pub mod client;
pub mod types;

#[cfg(test)]
pub mod test_server;
