use moviecat_core::{
    Catalog, CatalogError, CatalogService, EntityKind, MemoryCatalog, MovieDraft, ReviewDraft,
    UserDraft,
};

fn movie_draft(title: &str) -> MovieDraft {
    MovieDraft {
        title: title.to_string(),
        studio: "Warner Bros.".to_string(),
        description: None,
        year: 2010,
    }
}

fn review_draft(n_stars: f64, text: &str) -> ReviewDraft {
    ReviewDraft {
        n_stars,
        text: text.to_string(),
        user_id: 0,
    }
}

#[test]
fn review_ids_come_from_one_global_counter() {
    let mut catalog = MemoryCatalog::new();
    let matrix = catalog.insert_movie(&movie_draft("The Matrix")).unwrap();
    let inception = catalog.insert_movie(&movie_draft("Inception")).unwrap();

    // First review in the whole store gets id 0, regardless of which
    // movie it lands on.
    let first = catalog
        .insert_review(inception.id, &review_draft(4.6, "Great movie!"))
        .unwrap();
    assert_eq!(first.id, 0);

    let second = catalog
        .insert_review(inception.id, &review_draft(3.0, "decent"))
        .unwrap();
    assert_eq!(second.id, 1);

    // A review on another movie keeps drawing from the same counter.
    let third = catalog
        .insert_review(matrix.id, &review_draft(5.0, "classic"))
        .unwrap();
    assert_eq!(third.id, 2);
}

#[test]
fn remove_review_leaves_siblings_in_place() {
    let mut catalog = MemoryCatalog::new();
    catalog.insert_movie(&movie_draft("The Matrix")).unwrap();
    let inception = catalog.insert_movie(&movie_draft("Inception")).unwrap();

    let first = catalog
        .insert_review(inception.id, &review_draft(4.6, "Great movie!"))
        .unwrap();
    let second = catalog
        .insert_review(inception.id, &review_draft(3.0, "decent"))
        .unwrap();

    let removed = catalog.remove_review(inception.id, first.id).unwrap();
    assert_eq!(removed, first);

    let remaining = catalog.list_reviews(inception.id).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second.id);
}

#[test]
fn review_operations_reject_missing_movie_first() {
    let mut catalog = MemoryCatalog::new();
    let movie = catalog.insert_movie(&movie_draft("Inception")).unwrap();
    let review = catalog
        .insert_review(movie.id, &review_draft(4.0, "fine"))
        .unwrap();

    let missing = movie.id + 10;
    let movie_not_found = |err: CatalogError| {
        matches!(
            err,
            CatalogError::NotFound {
                kind: EntityKind::Movie,
                id
            } if id == missing
        )
    };

    assert!(movie_not_found(
        catalog
            .insert_review(missing, &review_draft(1.0, "x"))
            .unwrap_err()
    ));
    assert!(movie_not_found(catalog.list_reviews(missing).unwrap_err()));
    assert!(movie_not_found(
        catalog.get_review(missing, review.id).unwrap_err()
    ));
    assert!(movie_not_found(
        catalog
            .replace_review(missing, review.id, &review_draft(1.0, "x"))
            .unwrap_err()
    ));
    assert!(movie_not_found(
        catalog.remove_review(missing, review.id).unwrap_err()
    ));
}

#[test]
fn failed_insert_does_not_advance_review_counter() {
    let mut catalog = MemoryCatalog::new();
    let movie = catalog.insert_movie(&movie_draft("Inception")).unwrap();

    catalog
        .insert_review(movie.id + 1, &review_draft(2.0, "ghost"))
        .unwrap_err();
    catalog
        .insert_review(movie.id + 2, &review_draft(2.0, "ghost"))
        .unwrap_err();

    let review = catalog
        .insert_review(movie.id, &review_draft(4.6, "Great movie!"))
        .unwrap();
    assert_eq!(review.id, 0);
}

#[test]
fn deleting_a_movie_cascades_to_its_reviews() {
    let mut catalog = MemoryCatalog::new();
    let movie = catalog.insert_movie(&movie_draft("The Matrix")).unwrap();
    let review = catalog
        .insert_review(movie.id, &review_draft(4.6, "Great movie!"))
        .unwrap();

    catalog.remove_movie(movie.id).unwrap();

    // The orphaned review must not be retrievable through any path.
    let err = catalog.get_review(movie.id, review.id).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::NotFound {
            kind: EntityKind::Movie,
            ..
        }
    ));
    assert!(catalog.list_reviews(movie.id).is_err());
}

#[test]
fn replace_review_keeps_id_and_parent() {
    let mut catalog = MemoryCatalog::new();
    let movie = catalog.insert_movie(&movie_draft("Inception")).unwrap();
    let review = catalog
        .insert_review(movie.id, &review_draft(2.5, "first draft"))
        .unwrap();

    let updated = catalog
        .replace_review(movie.id, review.id, &review_draft(5.0, "second watch"))
        .unwrap();
    assert_eq!(updated.id, review.id);
    assert_eq!(updated.n_stars, 5.0);
    assert_eq!(updated.text, "second watch");

    let fetched = catalog.get_review(movie.id, review.id).unwrap().unwrap();
    assert_eq!(fetched, updated);
}

#[test]
fn missing_review_under_existing_movie_reads_as_absent() {
    let mut catalog = MemoryCatalog::new();
    let movie = catalog.insert_movie(&movie_draft("Inception")).unwrap();

    assert!(catalog.get_review(movie.id, 42).unwrap().is_none());

    let err = catalog
        .replace_review(movie.id, 42, &review_draft(1.0, "x"))
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::NotFound {
            kind: EntityKind::Review,
            id: 42
        }
    ));
}

#[test]
fn service_checks_movie_before_user() {
    let mut service = CatalogService::new(MemoryCatalog::new());

    // Both references missing: the movie must win deterministically.
    let err = service
        .create_review(9, &review_draft(4.0, "nice"))
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::NotFound {
            kind: EntityKind::Movie,
            id: 9
        }
    ));

    let movie = service.create_movie(&movie_draft("Inception")).unwrap();
    let err = service
        .create_review(
            movie.id,
            &ReviewDraft {
                n_stars: 4.0,
                text: "nice".to_string(),
                user_id: 77,
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::NotFound {
            kind: EntityKind::User,
            id: 77
        }
    ));
}

#[test]
fn service_creates_review_once_both_references_exist() {
    let mut service = CatalogService::new(MemoryCatalog::new());

    let movie = service.create_movie(&movie_draft("Inception")).unwrap();
    let user = service
        .create_user(&UserDraft {
            username: "joaozinho123".to_string(),
            fullname: Some("Joaozinho da Silva".to_string()),
            password: "12345678".to_string(),
        })
        .unwrap();

    let review = service
        .create_review(
            movie.id,
            &ReviewDraft {
                n_stars: 4.6,
                text: "Great movie!".to_string(),
                user_id: user.id,
            },
        )
        .unwrap();

    assert_eq!(review.user_id, user.id);
    let reviews = service.get_reviews(movie.id).unwrap();
    assert_eq!(reviews, vec![review]);
}

#[test]
fn service_wraps_catalog_calls() {
    let mut service = CatalogService::new(MemoryCatalog::new());

    let movie = service.create_movie(&movie_draft("The Matrix")).unwrap();
    let fetched = service.get_movie(movie.id).unwrap().unwrap();
    assert_eq!(fetched.title, "The Matrix");

    let review = service
        .add_review(movie.id, &review_draft(4.6, "Great movie!"))
        .unwrap();
    let fetched = service.get_review(movie.id, review.id).unwrap().unwrap();
    assert_eq!(fetched.text, "Great movie!");

    service.delete_review(movie.id, review.id).unwrap();
    assert!(service.get_review(movie.id, review.id).unwrap().is_none());

    service.delete_movie(movie.id).unwrap();
    assert!(service.list_movies().unwrap().is_empty());
}
