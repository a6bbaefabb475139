//! Test helpers for the OpenStack service APIs

#[cfg(test)]
#[allow(dead_code)]
pub fn create_test_client(url: &str) -> super::ServiceClient {
    super::ServiceClient::new(url, "test-token", true).unwrap()
}
