#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Common test utilities for graphql-gateway integration tests

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use graphql_gateway::config::GraphqlGatewayConfig;
use graphql_gateway::domain::error::DomainError;
use graphql_gateway::domain::ports::{QueryExecutor, SchemaStitcher, StitchInput};
use graphql_gateway::domain::sdl::TypeSystemDocument;
use graphql_gateway::infra::MergingStitcher;
use graphql_gateway::{CompositeSchema, GatewayController};
use graphql_gateway_sdk::{
    GatewayError, GraphqlCapability, GraphqlRequest, LifecycleEvent, OperationKind,
    RelationDefinition, RemoteLink, ServiceAnnouncement, ServiceIdentity, TypeSystemDescription,
};
use parking_lot::Mutex;
use serde_json::{Map, Value, json};

pub const AUTHOR_SDL: &str = "type Author { id: ID! name: String }
type Query { authors(id: ID): [Author] }";

pub const BOOK_SDL: &str = "type Book { id: ID! title: String authorId: ID }
type Query { books(id: ID, authorId: ID): [Book] }";

pub const CHAPTER_SDL: &str = "type Chapter { id: ID! title: String bookId: ID }
type Query { chapters(bookId: ID): [Chapter] }";

pub const REVIEW_SDL: &str = "type Review { id: ID! stars: Int }
type Query { reviews: [Review] }";

pub fn author() -> ServiceAnnouncement {
    ServiceAnnouncement::new("Author", GraphqlCapability::new(AUTHOR_SDL))
}

/// Author variant that also links back to its books.
pub fn author_with_books() -> ServiceAnnouncement {
    ServiceAnnouncement::new(
        "Author",
        GraphqlCapability::new(AUTHOR_SDL)
            .with_relationships("extend type Author { books: [Book] }")
            .with_relation(
                "Author.books",
                RelationDefinition::query("books").bind("authorId", "parent.id"),
            ),
    )
}

pub fn book() -> ServiceAnnouncement {
    ServiceAnnouncement::new(
        "Book",
        GraphqlCapability::new(BOOK_SDL)
            .with_relationships("extend type Book { author: Author chapters: [Chapter] }")
            .with_relation(
                "author",
                RelationDefinition::query("authors").bind("id", "parent.authorId"),
            )
            .with_relation(
                "chapters",
                RelationDefinition::query("chapters").bind("bookId", "parent.id"),
            ),
    )
}

pub fn chapter() -> ServiceAnnouncement {
    ServiceAnnouncement::new(
        "Chapter",
        GraphqlCapability::new(CHAPTER_SDL)
            .with_relationships("extend type Chapter { book: Book }")
            .with_relation(
                "book",
                RelationDefinition::query("books").bind("id", "parent.bookId"),
            ),
    )
}

pub const CATALOG_SDL: &str = "type Book { id: ID! title: String genre: Genre }
input BookFilter { title: String }
enum Genre { FICTION POETRY }
type Query { books(filter: BookFilter): [Book] }";

/// Book variant whose relationships take an input argument and return an enum.
pub fn catalog() -> ServiceAnnouncement {
    ServiceAnnouncement::new(
        "Book",
        GraphqlCapability::new(CATALOG_SDL)
            .with_relationships(
                "extend type Author { books(filter: BookFilter): [Book] genre: Genre }",
            )
            .with_relation(
                "Author.books",
                RelationDefinition::query("books").bind("filter", "args.filter"),
            )
            .with_relation("Author.genre", RelationDefinition::query("books")),
    )
}

pub fn review() -> ServiceAnnouncement {
    ServiceAnnouncement::new("Review", GraphqlCapability::new(REVIEW_SDL))
}

pub fn disconnected(identity: &str) -> LifecycleEvent {
    LifecycleEvent::Disconnected {
        identity: ServiceIdentity::from(identity),
    }
}

/// Recorded `invoke` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub identity: String,
    pub kind: OperationKind,
    pub operation: String,
    pub args: Map<String, Value>,
}

/// Remote link backed by in-memory schemas.
#[derive(Default)]
pub struct MockLink {
    schemas: Mutex<HashMap<String, String>>,
    failing: Mutex<HashSet<String>>,
    stalled: Mutex<HashSet<String>>,
    introspections: AtomicUsize,
    pub invocations: Mutex<Vec<Invocation>>,
}

impl MockLink {
    pub fn serve(&self, identity: &str, sdl: &str) {
        self.schemas.lock().insert(identity.to_owned(), sdl.to_owned());
    }

    pub fn fail(&self, identity: &str) {
        self.failing.lock().insert(identity.to_owned());
    }

    pub fn recover(&self, identity: &str) {
        self.failing.lock().remove(identity);
    }

    /// Introspection of `identity` never answers.
    pub fn stall(&self, identity: &str) {
        self.stalled.lock().insert(identity.to_owned());
    }

    pub fn introspections(&self) -> usize {
        self.introspections.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteLink for MockLink {
    async fn introspect(&self, identity: &ServiceIdentity) -> anyhow::Result<TypeSystemDescription> {
        self.introspections.fetch_add(1, Ordering::SeqCst);
        let stalled = self.stalled.lock().contains(identity.as_str());
        if stalled {
            std::future::pending::<()>().await;
        }
        if self.failing.lock().contains(identity.as_str()) {
            anyhow::bail!("service {identity} is unreachable");
        }
        let sdl = self
            .schemas
            .lock()
            .get(identity.as_str())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no schema served for {identity}"))?;
        Ok(TypeSystemDescription::new(sdl))
    }

    async fn invoke(
        &self,
        identity: &ServiceIdentity,
        kind: OperationKind,
        operation: &str,
        args: Map<String, Value>,
    ) -> anyhow::Result<Value> {
        self.invocations.lock().push(Invocation {
            identity: identity.to_string(),
            kind,
            operation: operation.to_owned(),
            args: args.clone(),
        });
        Ok(json!({ "service": identity.as_str(), "operation": operation, "args": args }))
    }
}

/// Stitcher that counts compositions and delegates to the default one.
#[derive(Default)]
pub struct CountingStitcher {
    calls: AtomicUsize,
}

impl CountingStitcher {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SchemaStitcher for CountingStitcher {
    fn stitch(&self, input: &StitchInput<'_>) -> Result<TypeSystemDocument, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        MergingStitcher.stitch(input)
    }
}

/// Executor that records requests and answers with the composite's root fields.
#[derive(Default)]
pub struct RecordingExecutor {
    pub requests: Mutex<Vec<GraphqlRequest>>,
}

#[async_trait]
impl QueryExecutor for RecordingExecutor {
    async fn execute(
        &self,
        schema: Arc<CompositeSchema>,
        request: GraphqlRequest,
    ) -> Result<Value, GatewayError> {
        self.requests.lock().push(request);
        Ok(json!({ "data": { "queryFields": schema.query_field_names() } }))
    }
}

pub struct Harness {
    pub controller: Arc<GatewayController>,
    pub link: Arc<MockLink>,
    pub stitcher: Arc<CountingStitcher>,
    pub executor: Arc<RecordingExecutor>,
}

impl Harness {
    /// Serve the announced fragment over the link, then deliver `connected`.
    pub async fn connect(&self, announcement: ServiceAnnouncement) -> Result<(), GatewayError> {
        self.link
            .serve(announcement.identity.as_str(), &announcement.capability.fragment);
        self.controller
            .handle_event(LifecycleEvent::Connected(announcement))
            .await
    }

    pub async fn disconnect(&self, identity: &str) {
        self.controller
            .handle_event(disconnected(identity))
            .await
            .unwrap();
    }

    pub async fn outstanding(&self) -> Vec<String> {
        self.controller.outstanding().await.into_iter().collect()
    }
}

pub fn fast_config() -> GraphqlGatewayConfig {
    GraphqlGatewayConfig {
        wait_timeout: Duration::from_millis(300),
        poll_interval: Duration::from_millis(50),
        ..GraphqlGatewayConfig::default()
    }
}

pub fn harness(config: GraphqlGatewayConfig) -> Harness {
    let link = Arc::new(MockLink::default());
    let stitcher = Arc::new(CountingStitcher::default());
    let executor = Arc::new(RecordingExecutor::default());
    let controller = GatewayController::new(
        config,
        Arc::clone(&link) as Arc<dyn RemoteLink>,
        Arc::clone(&executor) as Arc<dyn QueryExecutor>,
    )
    .unwrap()
    .with_stitcher(Arc::clone(&stitcher) as Arc<dyn SchemaStitcher>);

    Harness {
        controller: Arc::new(controller),
        link,
        stitcher,
        executor,
    }
}
