use super::*;
use crate::api::test_helpers::create_test_client;
use mockito::{Matcher, Server as MockServer};

fn compute(url: &str) -> ComputeApi {
    ComputeApi::new(create_test_client(url))
}

#[tokio::test]
async fn create_server_posts_wrapped_request_and_returns_id() {
    let mut server = MockServer::new_async().await;
    let mock = server
        .mock("POST", "/servers")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "server": {
                "name": "web-1",
                "imageRef": "image-1",
                "flavorRef": "flavor-1",
                "key_name": "deploy-key"
            }
        })))
        .with_body(r#"{"server":{"id":"abc-123","adminPass":"xyz"}}"#)
        .create_async()
        .await;

    let request = CreateServerRequest {
        name: "web-1".to_string(),
        image_ref: "image-1".to_string(),
        flavor_ref: "flavor-1".to_string(),
        key_name: Some("deploy-key".to_string()),
        ..Default::default()
    };

    let created = compute(&server.url()).create_server(&request).await.unwrap();
    assert_eq!(created.id, "abc-123");
    mock.assert_async().await;
}

#[tokio::test]
async fn create_server_omits_unset_optional_fields() {
    let mut server = MockServer::new_async().await;
    let mock = server
        .mock("POST", "/servers")
        .match_body(Matcher::JsonString(
            r#"{"server":{"name":"web-1","imageRef":"image-1","flavorRef":"flavor-1"}}"#
                .to_string(),
        ))
        .with_body(r#"{"server":{"id":"abc-123"}}"#)
        .create_async()
        .await;

    let request = CreateServerRequest {
        name: "web-1".to_string(),
        image_ref: "image-1".to_string(),
        flavor_ref: "flavor-1".to_string(),
        ..Default::default()
    };

    compute(&server.url()).create_server(&request).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn get_server_parses_full_document() {
    let mut server = MockServer::new_async().await;
    let _mock = server
        .mock("GET", "/servers/abc-123")
        .with_body(
            r#"{"server":{
                "id":"abc-123",
                "name":"web-1",
                "status":"ACTIVE",
                "accessIPv4":"",
                "accessIPv6":"",
                "addresses":{"private":[{"addr":"10.0.0.4","version":4}]},
                "metadata":{"role":"web"},
                "flavor":{"id":"flavor-1"},
                "image":{"id":"image-1"},
                "security_groups":[{"name":"default"}],
                "key_name":"deploy-key"
            }}"#,
        )
        .create_async()
        .await;

    let fetched = compute(&server.url()).get_server("abc-123").await.unwrap();
    assert_eq!(fetched.status, "ACTIVE");
    assert_eq!(fetched.flavor.id, "flavor-1");
    assert_eq!(fetched.metadata["role"], "web");
    assert_eq!(fetched.addresses["private"][0].addr, "10.0.0.4");
    assert_eq!(fetched.key_name.as_deref(), Some("deploy-key"));
}

#[tokio::test]
async fn get_server_surfaces_not_found() {
    let mut server = MockServer::new_async().await;
    let _mock = server
        .mock("GET", "/servers/gone")
        .with_status(404)
        .with_body(r#"{"itemNotFound":{"code":404}}"#)
        .create_async()
        .await;

    let err = compute(&server.url()).get_server("gone").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn update_server_puts_only_changed_fields() {
    let mut server = MockServer::new_async().await;
    let mock = server
        .mock("PUT", "/servers/abc-123")
        .match_body(Matcher::JsonString(
            r#"{"server":{"name":"renamed"}}"#.to_string(),
        ))
        .with_body(
            r#"{"server":{
                "id":"abc-123","name":"renamed","status":"ACTIVE",
                "flavor":{"id":"flavor-1"},"image":{"id":"image-1"}
            }}"#,
        )
        .create_async()
        .await;

    let request = UpdateServerRequest {
        name: Some("renamed".to_string()),
        ..Default::default()
    };
    let updated = compute(&server.url())
        .update_server("abc-123", &request)
        .await
        .unwrap();

    assert_eq!(updated.name, "renamed");
    mock.assert_async().await;
}

#[tokio::test]
async fn replace_metadata_puts_the_whole_map() {
    let mut server = MockServer::new_async().await;
    let mock = server
        .mock("PUT", "/servers/abc-123/metadata")
        .match_body(Matcher::JsonString(
            r#"{"metadata":{"role":"db"}}"#.to_string(),
        ))
        .with_body(r#"{"metadata":{"role":"db"}}"#)
        .create_async()
        .await;

    let mut metadata = std::collections::HashMap::new();
    metadata.insert("role".to_string(), "db".to_string());

    let stored = compute(&server.url())
        .replace_metadata("abc-123", &metadata)
        .await
        .unwrap();

    assert_eq!(stored["role"], "db");
    mock.assert_async().await;
}

#[tokio::test]
async fn server_actions_use_the_documented_bodies() {
    let mut server = MockServer::new_async().await;
    let resize = server
        .mock("POST", "/servers/abc-123/action")
        .match_body(Matcher::JsonString(
            r#"{"resize":{"flavorRef":"flavor-2"}}"#.to_string(),
        ))
        .with_status(202)
        .create_async()
        .await;
    let confirm = server
        .mock("POST", "/servers/abc-123/action")
        .match_body(Matcher::JsonString(r#"{"confirmResize":null}"#.to_string()))
        .with_status(202)
        .create_async()
        .await;
    let password = server
        .mock("POST", "/servers/abc-123/action")
        .match_body(Matcher::JsonString(
            r#"{"changePassword":{"adminPass":"hunter2"}}"#.to_string(),
        ))
        .with_status(202)
        .create_async()
        .await;
    let add_group = server
        .mock("POST", "/servers/abc-123/action")
        .match_body(Matcher::JsonString(
            r#"{"addSecurityGroup":{"name":"web"}}"#.to_string(),
        ))
        .with_status(202)
        .create_async()
        .await;
    let remove_group = server
        .mock("POST", "/servers/abc-123/action")
        .match_body(Matcher::JsonString(
            r#"{"removeSecurityGroup":{"name":"default"}}"#.to_string(),
        ))
        .with_status(202)
        .create_async()
        .await;

    let api = compute(&server.url());
    api.resize("abc-123", "flavor-2").await.unwrap();
    api.confirm_resize("abc-123").await.unwrap();
    api.change_password("abc-123", "hunter2").await.unwrap();
    api.add_security_group("abc-123", "web").await.unwrap();
    api.remove_security_group("abc-123", "default").await.unwrap();

    resize.assert_async().await;
    confirm.assert_async().await;
    password.assert_async().await;
    add_group.assert_async().await;
    remove_group.assert_async().await;
}

#[tokio::test]
async fn list_images_filters_by_name() {
    let mut server = MockServer::new_async().await;
    let mock = server
        .mock("GET", "/images/detail")
        .match_query(Matcher::UrlEncoded("name".to_string(), "jammy".to_string()))
        .with_body(r#"{"images":[{"id":"image-1","name":"jammy"}]}"#)
        .create_async()
        .await;

    let images = compute(&server.url())
        .list_images(Some("jammy"))
        .await
        .unwrap();

    assert_eq!(images.len(), 1);
    assert_eq!(images[0].id, "image-1");
    mock.assert_async().await;
}

#[tokio::test]
async fn list_flavors_returns_the_detail_listing() {
    let mut server = MockServer::new_async().await;
    let _mock = server
        .mock("GET", "/flavors/detail")
        .with_body(
            r#"{"flavors":[
                {"id":"flavor-1","name":"m1.small"},
                {"id":"flavor-2","name":"m1.medium"}
            ]}"#,
        )
        .create_async()
        .await;

    let flavors = compute(&server.url()).list_flavors().await.unwrap();
    assert_eq!(flavors.len(), 2);
    assert_eq!(flavors[1].name, "m1.medium");
}

#[tokio::test]
async fn attach_volume_omits_device_when_unset() {
    let mut server = MockServer::new_async().await;
    let mock = server
        .mock("POST", "/servers/abc-123/os-volume_attachments")
        .match_body(Matcher::JsonString(
            r#"{"volumeAttachment":{"volumeId":"vol-1"}}"#.to_string(),
        ))
        .with_body(
            r#"{"volumeAttachment":{"id":"att-1","volumeId":"vol-1","device":"/dev/vdb"}}"#,
        )
        .create_async()
        .await;

    let attachment = compute(&server.url())
        .attach_volume("abc-123", "vol-1", None)
        .await
        .unwrap();

    assert_eq!(attachment.id, "att-1");
    assert_eq!(attachment.device, "/dev/vdb");
    mock.assert_async().await;
}

#[tokio::test]
async fn detach_volume_deletes_the_attachment() {
    let mut server = MockServer::new_async().await;
    let mock = server
        .mock("DELETE", "/servers/abc-123/os-volume_attachments/att-1")
        .with_status(202)
        .create_async()
        .await;

    compute(&server.url())
        .detach_volume("abc-123", "att-1")
        .await
        .unwrap();

    mock.assert_async().await;
}
