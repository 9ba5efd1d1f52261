use std::sync::Arc;
use stockdesk::Console;
use stockdesk::dataset::DatasetKind;
use stockdesk::errors::ConsoleError;
use stockdesk::guard::Access;
use stockdesk::query::{Order, QuerySpec, SortSpec};
use stockdesk::record::{UserDto, project_all};
use stockdesk::session::{RoleInput, Session};
use stockdesk::source::{MemorySource, ServerSource};

fn console() -> Console {
    let dtos: Vec<UserDto> = (1..=3)
        .map(|id| UserDto {
            id,
            username: format!("user{id}"),
            roles: Some(RoleInput::from("ROLE_USER")),
            enabled: Some(true),
            created_at: None,
        })
        .collect();
    let mem = Arc::new(MemorySource::new());
    mem.load(DatasetKind::Users, project_all(&dtos));
    Console::new(Arc::new(ServerSource::new(mem)), Arc::new(Session::new()))
}

#[test]
fn fetches_are_refused_until_authentication() {
    let console = console();
    let spec = QuerySpec::new(SortSpec::new("id", Order::Asc));

    let err = console.page(DatasetKind::Users, &spec).unwrap_err();
    assert!(matches!(err, ConsoleError::Unauthorized));

    console.session().authenticate("tok", "ayse", RoleInput::from("ROLE_ADMIN"));
    let page = console.page(DatasetKind::Users, &spec).unwrap();
    assert_eq!(page.total_count, 3);
}

#[test]
fn an_invalidated_session_stops_further_fetches() {
    let console = console();
    let spec = QuerySpec::new(SortSpec::new("id", Order::Asc));
    console.session().authenticate("tok", "ayse", RoleInput::from("ROLE_ADMIN"));
    assert!(console.page(DatasetKind::Users, &spec).is_ok());

    console.session().invalidate();
    let err = console.page(DatasetKind::Users, &spec).unwrap_err();
    assert!(matches!(err, ConsoleError::Unauthorized));

    console.session().authenticate("tok-2", "ayse", RoleInput::from("ROLE_ADMIN"));
    assert!(console.page(DatasetKind::Users, &spec).is_ok());
}

#[test]
fn the_facade_hands_out_a_guard_over_its_session() {
    let console = console();
    assert_eq!(console.guard().check(Some("ADMIN")), Access::RedirectToLogin);
    console.session().authenticate("tok", "ayse", RoleInput::from("ROLE_ADMIN"));
    assert_eq!(console.guard().check(Some("ADMIN")), Access::Granted);
}
