//! Probe and bucket operations against a mock S3 endpoint.

use minio_artifacts_core::{BucketAddress, CandidateConfiguration, ValidationResult};
use minio_artifacts_s3::*;
use std::sync::Arc;
use wiremock::matchers::{method, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Name>my-bucket</Name>
  <Prefix>builds/</Prefix>
  <Delimiter>/</Delimiter>
  <KeyCount>2</KeyCount>
  <MaxKeys>1000</MaxKeys>
  <IsTruncated>false</IsTruncated>
  <Contents>
    <Key>builds/readme.txt</Key>
    <LastModified>2024-01-01T00:00:00.000Z</LastModified>
    <ETag>"0123456789abcdef"</ETag>
    <Size>42</Size>
    <StorageClass>STANDARD</StorageClass>
  </Contents>
  <CommonPrefixes>
    <Prefix>builds/job-1/</Prefix>
  </CommonPrefixes>
</ListBucketResult>"#;

const LOCATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<LocationConstraint xmlns="http://s3.amazonaws.com/doc/2006-03-01/">eu-west-1</LocationConstraint>"#;

const ACCESS_DENIED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>AccessDenied</Code><Message>Access Denied.</Message><Resource>/my-bucket</Resource><RequestId>1</RequestId></Error>"#;

const NOT_IMPLEMENTED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>NotImplemented</Code><Message>A header you provided implies functionality that is not implemented</Message><RequestId>2</RequestId></Error>"#;

fn xml(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .insert_header("content-type", "application/xml")
        .set_body_string(body)
}

async fn mount_listing(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/my-bucket/?$"))
        .and(query_param("list-type", "2"))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_location(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/my-bucket/?$"))
        .and(query_param("location", ""))
        .respond_with(response)
        .mount(server)
        .await;
}

fn credentials() -> Arc<dyn CredentialResolver> {
    Arc::new(CredentialsSource::explicit("minio", "minio123"))
}

fn tester(server: &MockServer) -> ConfigTester {
    ConfigTester::new(server.uri(), "my-bucket", "builds/", credentials())
}

#[tokio::test]
async fn test_probe_success() {
    let server = MockServer::start().await;
    mount_listing(&server, xml(200, LISTING)).await;
    mount_location(&server, xml(200, LOCATION)).await;

    let result = tester(&server).probe().await;

    assert_eq!(result.listing, ProbeStatus::Passed);
    assert_eq!(result.location, ProbeStatus::Passed);
    assert!(!result.is_blocking());
    assert_eq!(result.to_validation(), ValidationResult::ok_with("success"));
}

#[tokio::test]
async fn test_probe_listing_denied_blocks() {
    let server = MockServer::start().await;
    mount_listing(&server, xml(403, ACCESS_DENIED)).await;
    mount_location(&server, xml(200, LOCATION)).await;

    let result = tester(&server).probe().await;

    assert!(result.is_blocking());
    let validation = result.to_validation();
    assert!(validation.is_error());
    let message = validation.message().unwrap();
    assert!(message.chars().count() <= MESSAGE_LIMIT);
    assert!(message.contains("ListObjectsV2"));
}

#[tokio::test]
async fn test_probe_location_unsupported_warns() {
    let server = MockServer::start().await;
    mount_listing(&server, xml(200, LISTING)).await;
    mount_location(&server, xml(501, NOT_IMPLEMENTED)).await;

    let result = tester(&server).probe().await;

    assert_eq!(result.listing, ProbeStatus::Passed);
    assert!(result.location.is_failed());
    assert!(!result.is_blocking());

    let validation = result.to_validation();
    assert!(validation.is_warning());
    assert!(validation.message().unwrap().starts_with("GetBucketLocation failed: "));
}

#[tokio::test]
async fn test_context_lists_folders_then_objects() {
    let server = MockServer::start().await;
    mount_listing(&server, xml(200, LISTING)).await;
    mount_location(&server, xml(200, LOCATION)).await;

    let provider = BlobStoreProvider::with_settings(
        CandidateConfiguration::new(BucketAddress::new(server.uri(), "my-bucket", "builds/")),
        credentials(),
    );
    let context = provider.context().unwrap();

    let entries = context.list("my-bucket", "builds/").await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].key, "builds/job-1/");
    assert!(entries[0].is_folder);
    assert_eq!(entries[1].key, "builds/readme.txt");
    assert_eq!(entries[1].size, 42);

    let location = context.bucket_location("my-bucket").await.unwrap();
    assert_eq!(location.as_deref(), Some("eu-west-1"));
}

#[tokio::test]
async fn test_admin_create_bucket() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path_regex(r"^/new-bucket/?$"))
        .respond_with(ResponseTemplate::new(200).insert_header("Location", "/new-bucket"))
        .expect(1)
        .mount(&server)
        .await;

    let admin = AdminService::with_settings(
        CandidateConfiguration::new(BucketAddress::new(server.uri(), "my-bucket", "")),
        credentials(),
    );

    let created = admin.create_bucket("new-bucket").await.unwrap();
    assert_eq!(created.name, "new-bucket");
    assert_eq!(created.location.as_deref(), Some("/new-bucket"));
}

#[tokio::test]
async fn test_admin_check_create_bucket_reports_failure() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path_regex(r"^/taken-bucket/?$"))
        .respond_with(xml(
            409,
            r#"<Error><Code>BucketAlreadyOwnedByYou</Code><Message>Your previous request to create the named bucket succeeded and you already own it.</Message></Error>"#,
        ))
        .mount(&server)
        .await;

    let admin = AdminService::with_settings(
        CandidateConfiguration::new(BucketAddress::new(server.uri(), "my-bucket", "")),
        credentials(),
    );

    let result = admin.check_create_bucket("taken-bucket").await;
    assert!(result.is_error());
    assert!(result.message().unwrap().chars().count() <= MESSAGE_LIMIT);
}
