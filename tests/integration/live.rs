//! Live tests against a real Canto tenant. All `#[ignore]`d.

use super::common::live_client;
use canto_saas_api::rest::{GetTreeRequest, QueryUploadStatusRequest, SearchRequest};

#[tokio::test]
#[ignore]
async fn test_live_token_is_held() {
    let client = live_client().await;
    assert!(client.inner().is_authorized());
}

#[tokio::test]
#[ignore]
async fn test_live_search_and_details() {
    let client = live_client().await;

    let page = client
        .asset()
        .search(&SearchRequest::default().with_paging(0, 5))
        .await
        .expect("search should succeed");
    assert!(page.results.len() <= 5);

    if let Some(first) = page.results.first() {
        let details = client
            .asset()
            .get_content_details(&canto_saas_api::rest::GetContentDetailsRequest::new(
                first.id.clone(),
                first.scheme,
            ))
            .await
            .expect("content details should succeed");
        assert_eq!(details.id, first.id);
    }
}

#[tokio::test]
#[ignore]
async fn test_live_tree_and_uploads() {
    let client = live_client().await;

    let tree = client
        .library_tree()
        .get_tree(&GetTreeRequest::new().with_layer(1))
        .await
        .expect("tree should succeed");
    println!("top-level nodes: {}", tree.results.len());

    client
        .upload()
        .query_upload_status(&QueryUploadStatusRequest::new().with_hours(24))
        .await
        .expect("upload status should succeed");
}
