mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use portal_core::domain::errors::ServiceError;
use portal_core::domain::models::{
    Component, CreateComponentRequest, Group, Link, PageRequest, UpdateTeamRequest,
    TECHNICAL_TEAM_NAME,
};
use portal_core::domain::ports::ComponentRepository;
use portal_core::services::TeamService;

use common::{
    component_request, team_request, user_request, InMemoryComponentRepository,
    InMemoryGroupRepository, InMemoryLinkRepository, InMemoryTeamRepository,
    InMemoryUserRepository,
};

struct Fixture {
    group: Group,
    links: Arc<InMemoryLinkRepository>,
    components: Arc<InMemoryComponentRepository>,
    users: Arc<InMemoryUserRepository>,
    service: TeamService<
        InMemoryTeamRepository,
        InMemoryGroupRepository,
        InMemoryLinkRepository,
        InMemoryComponentRepository,
        InMemoryUserRepository,
    >,
}

async fn fixture() -> Fixture {
    let teams = Arc::new(InMemoryTeamRepository::default());
    let groups = Arc::new(InMemoryGroupRepository::default());
    let links = Arc::new(InMemoryLinkRepository::default());
    let components = Arc::new(InMemoryComponentRepository::default());
    let users = Arc::new(InMemoryUserRepository::default());

    let group = Group {
        id: Uuid::new_v4(),
        name: "platform".to_string(),
        organization_id: Uuid::new_v4(),
    };
    groups.seed(group.clone()).await;

    let service = TeamService::new(
        Arc::clone(&teams),
        Arc::clone(&groups),
        Arc::clone(&links),
        Arc::clone(&components),
        Arc::clone(&users),
    );

    Fixture {
        group,
        links,
        components,
        users,
        service,
    }
}

#[tokio::test]
async fn responses_resolve_the_organization_through_the_group() {
    let f = fixture().await;

    let created = f
        .service
        .create(team_request("team-billing", f.group.id))
        .await
        .unwrap();

    assert_eq!(created.organization_id, f.group.organization_id);
    assert_eq!(created.group_id, f.group.id);

    let fetched = f.service.get_by_name("team-billing", None).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.organization_id, f.group.organization_id);
}

#[tokio::test]
async fn a_missing_group_fails_the_whole_operation() {
    let f = fixture().await;

    let created = f
        .service
        .create(team_request("team-billing", f.group.id))
        .await
        .unwrap();

    // Point the team at a group nobody knows.
    let err = f
        .service
        .update(
            created.id,
            UpdateTeamRequest {
                group_id: Some(Uuid::new_v4()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound { entity: "group", .. }));
}

#[tokio::test]
async fn listings_hide_the_technical_team_and_adjust_the_total() {
    let f = fixture().await;

    f.service
        .create(team_request("team-billing", f.group.id))
        .await
        .unwrap();
    f.service
        .create(team_request(TECHNICAL_TEAM_NAME, f.group.id))
        .await
        .unwrap();

    let page = f
        .service
        .list(None, PageRequest::default(), None)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "team-billing");
    // Repository reported 2; one filtered row is subtracted.
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn update_merges_metadata_instead_of_replacing_it() {
    let f = fixture().await;

    let mut request = team_request("team-billing", f.group.id);
    request.metadata = Some(json!({"slack": "#team-billing", "oncall": "rota-1"}));
    let created = f.service.create(request).await.unwrap();

    let updated = f
        .service
        .update(
            created.id,
            UpdateTeamRequest {
                metadata: Some(json!({"oncall": "rota-2"})),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(
        updated.metadata,
        Some(json!({"slack": "#team-billing", "oncall": "rota-2"}))
    );
}

#[tokio::test]
async fn malformed_metadata_patch_is_rejected() {
    let f = fixture().await;

    let created = f
        .service
        .create(team_request("team-billing", f.group.id))
        .await
        .unwrap();

    let err = f
        .service
        .update(
            created.id,
            UpdateTeamRequest {
                metadata: Some(json!([1, 2, 3])),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::MalformedMetadata(_)));
}

#[tokio::test]
async fn links_are_marked_against_the_viewers_favorites() {
    let f = fixture().await;

    let team = f
        .service
        .create(team_request("team-billing", f.group.id))
        .await
        .unwrap();

    let favorite_link = Link {
        id: Uuid::new_v4(),
        owner_id: team.id,
        url: "https://wiki.example.com/billing".to_string(),
        title: "Runbook".to_string(),
        description: None,
    };
    let other_link = Link {
        id: Uuid::new_v4(),
        owner_id: team.id,
        url: "https://dash.example.com/billing".to_string(),
        title: "Dashboard".to_string(),
        description: None,
    };
    f.links.seed(favorite_link.clone()).await;
    f.links.seed(other_link.clone()).await;

    let mut viewer = user_request("D001", "dev@example.com");
    viewer.metadata = Some(json!({"favorites": [favorite_link.id.to_string()]}));
    f.users
        .seed(portal_core::domain::models::User::new(viewer))
        .await;

    let seen = f.service.get_by_id(team.id, Some("D001")).await.unwrap();
    let marked: Vec<_> = seen
        .links
        .iter()
        .filter(|l| l.favorite)
        .map(|l| l.id)
        .collect();
    assert_eq!(marked, vec![favorite_link.id]);

    // No viewer, or an unknown one, degrades to unmarked.
    let anonymous = f.service.get_by_id(team.id, None).await.unwrap();
    assert!(anonymous.links.iter().all(|l| !l.favorite));
    let unknown = f.service.get_by_id(team.id, Some("nobody")).await.unwrap();
    assert!(unknown.links.iter().all(|l| !l.favorite));
}

#[tokio::test]
async fn link_lookup_failure_degrades_to_an_empty_list() {
    let f = fixture().await;

    let team = f
        .service
        .create(team_request("team-billing", f.group.id))
        .await
        .unwrap();
    f.links.fail.store(true, Ordering::SeqCst);

    let fetched = f.service.get_by_id(team.id, None).await.unwrap();
    assert!(fetched.links.is_empty());
}

#[tokio::test]
async fn team_component_listing_defaults_to_one_hundred() {
    let f = fixture().await;

    let team = f
        .service
        .create(team_request("team-billing", f.group.id))
        .await
        .unwrap();

    for i in 0..3 {
        let component = Component::new(component_request(&format!("svc-{i}"), team.id));
        f.components.create(&component).await.unwrap();
    }
    // A component of some other team must not leak in.
    let foreign = Component::new(CreateComponentRequest {
        owner_id: Uuid::new_v4(),
        project_id: "P9".to_string(),
        name: "other-svc".to_string(),
        metadata: None,
    });
    f.components.create(&foreign).await.unwrap();

    let page = f
        .service
        .components(team.id, PageRequest::new(0, 0))
        .await
        .unwrap();

    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 100);
    assert_eq!(page.total, 3);
    assert!(page.items.iter().all(|c| c.owner_id == team.id));

    let err = f
        .service
        .components(Uuid::new_v4(), PageRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "team", .. }));
}
