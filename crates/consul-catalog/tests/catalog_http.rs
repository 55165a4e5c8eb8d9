//! End-to-end tests of the catalog client over HTTP against a mock agent.

use consul_catalog::{Catalog, Node};
use consul_core::{BlockFor, Consistency, Consul, ConsulBuilder, Error};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_consul(server: &MockServer) -> Consul {
    Consul::new(server.uri()).unwrap()
}

#[tokio::test]
async fn datacenters_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/catalog/datacenters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["dc1", "dc2"])))
        .expect(2)
        .mount(&server)
        .await;

    let consul = test_consul(&server);
    let catalog = Catalog::new(&consul);

    let first = catalog.datacenters().await.unwrap();
    assert_eq!(first, vec!["dc1", "dc2"]);
    assert_eq!(catalog.datacenters().await.unwrap(), first);
}

#[tokio::test]
async fn nodes_with_blocking_query_and_default_consistency() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/catalog/nodes"))
        .and(query_param("stale", ""))
        .and(query_param("index", "120"))
        .and(query_param("wait", "30000ms"))
        .and(query_param("dc", "dc2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "Node": "n1", "Address": "10.0.0.1" },
            { "Node": "n2", "Address": "10.0.0.2" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let consul = ConsulBuilder::new(server.uri())
        .unwrap()
        .with_datacenter("dc2")
        .build()
        .unwrap();
    let catalog = Catalog::with_params(&consul, &[Consistency::Stale.into()]).unwrap();

    let nodes = catalog
        .nodes(&[BlockFor::new(Duration::from_secs(30), 120).into()])
        .await
        .unwrap();
    assert_eq!(
        nodes,
        vec![Node::new("n1", "10.0.0.1"), Node::new("n2", "10.0.0.2")]
    );
}

#[tokio::test]
async fn consistency_override_sent_instead_of_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/catalog/services"))
        .and(query_param("consistent", ""))
        .and(query_param_is_missing("stale"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "web": ["v1"] })))
        .expect(1)
        .mount(&server)
        .await;

    let consul = test_consul(&server);
    let catalog = Catalog::with_params(&consul, &[Consistency::Stale.into()]).unwrap();

    let services = catalog
        .services(&[Consistency::Consistent.into()])
        .await
        .unwrap();
    assert!(services["web"].contains("v1"));
}

#[tokio::test]
async fn missing_node_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/catalog/node/missing-node"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .expect(1)
        .mount(&server)
        .await;

    let consul = test_consul(&server);
    let result = Catalog::new(&consul)
        .node("missing-node", &[])
        .await
        .unwrap();

    assert_eq!(result.node, Node::invalid());
    assert!(result.services.is_empty());
}

#[tokio::test]
async fn tagged_service_with_reserved_characters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/catalog/service/my%20web"))
        .and(query_param("tag", "blue green"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "Node": "n1",
            "Address": "10.0.0.1",
            "ServiceID": "my-web-1",
            "ServiceName": "my web",
            "ServiceTags": ["blue green"],
            "ServiceAddress": "",
            "ServicePort": 80
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let consul = test_consul(&server);
    let instances = Catalog::new(&consul)
        .service_with_tag("my web", "blue green", &[])
        .await
        .unwrap();

    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].service.name, "my web");
    assert!(instances[0].service.has_tag("blue green"));
    assert_eq!(instances[0].node, Node::new("n1", "10.0.0.1"));
}

#[tokio::test]
async fn rejected_parameters_send_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;

    let consul = test_consul(&server);
    let catalog = Catalog::new(&consul);

    let err = catalog
        .service_with_tag("web", "prod", &[consul_core::Tag::new("dev").into()])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)));
}

#[tokio::test]
async fn server_errors_propagate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/catalog/service/web"))
        .respond_with(ResponseTemplate::new(500).set_body_string("rpc error"))
        .expect(1)
        .mount(&server)
        .await;

    let consul = test_consul(&server);
    let err = Catalog::new(&consul)
        .service("web", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ServiceUnavailable(_)));
}

#[tokio::test]
async fn concurrent_queries_share_one_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/catalog/datacenters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["dc1"])))
        .expect(3)
        .mount(&server)
        .await;

    let consul = test_consul(&server);
    let catalog = Catalog::new(&consul);

    let (a, b, c) = tokio::join!(
        catalog.datacenters(),
        catalog.datacenters(),
        catalog.datacenters()
    );
    for result in [a, b, c] {
        assert_eq!(result.unwrap(), vec!["dc1"]);
    }
}
