use stockdesk::query::ResultPage;
use stockdesk::record::{MovementDto, ProductDto, Project, UserDto};

#[test]
fn movement_json_with_nested_refs_projects_flat() {
    let json = r#"{
        "id": 12,
        "movementDate": "2026-03-05T14:30:00",
        "movementType": "IN",
        "product": {"id": 3, "name": "Vida M4"},
        "warehouse": {"id": 7, "name": "Merkez"},
        "quantity": 40,
        "unitPrice": 2.5,
        "user": {"id": 1, "username": "ayse"},
        "note": "sayım farkı"
    }"#;
    let dto: MovementDto = serde_json::from_str(json).unwrap();
    let row = dto.project();
    assert_eq!(row.id(), 12);
    assert_eq!(row.render("productName"), "Vida M4");
    assert_eq!(row.render("warehouseId"), "7");
    assert_eq!(row.render("quantity"), "40");
    assert_eq!(row.render("unitPrice"), "2.5");
    assert_eq!(row.render("user"), "ayse");
    assert_eq!(row.render("movementDate"), "2026-03-05T14:30:00Z");
}

#[test]
fn sparse_movement_json_still_projects() {
    let dto: MovementDto = serde_json::from_str(r#"{"id": 1}"#).unwrap();
    let row = dto.project();
    assert_eq!(row.render("productName"), "");
    assert_eq!(row.render("warehouseName"), "");
    assert_eq!(row.render("movementDate"), "");
    assert!(row.sort_key("quantity").is_none());
}

#[test]
fn product_without_category_projects_empty_fields() {
    let json = r#"{"id": 2, "productCode": "VD-004", "name": "Vida M4", "createdAt": "2026-01-15T00:00:00"}"#;
    let dto: ProductDto = serde_json::from_str(json).unwrap();
    let row = dto.project();
    assert_eq!(row.render("categoryName"), "");
    assert_eq!(row.render("productCode"), "VD-004");
    assert!(row.sort_key("createdAt").is_some());
}

#[test]
fn user_roles_decode_from_either_shape() {
    let joined: UserDto =
        serde_json::from_str(r#"{"id": 1, "username": "ayse", "roles": "ROLE_ADMIN,ROLE_USER"}"#)
            .unwrap();
    let listed: UserDto =
        serde_json::from_str(r#"{"id": 2, "username": "mehmet", "roles": ["admin", "user"]}"#)
            .unwrap();
    assert_eq!(joined.project().render("roles"), "ADMIN,USER");
    assert_eq!(listed.project().render("roles"), "ADMIN,USER");
}

#[test]
fn server_page_envelope_decodes_directly() {
    let json = r#"{
        "content": [{"id": 9, "productCode": "SM-001", "name": "Somun"}],
        "number": 2,
        "totalPages": 5,
        "totalElements": 43
    }"#;
    let page: ResultPage<ProductDto> = serde_json::from_str(json).unwrap();
    assert_eq!(page.page_index, 2);
    assert_eq!(page.page_count, 5);
    assert_eq!(page.total_count, 43);
    assert_eq!(page.content[0].project().render("name"), "Somun");
}
