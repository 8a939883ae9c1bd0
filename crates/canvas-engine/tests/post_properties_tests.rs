// Property tests for post identity and ordering

use canvas_core::model::{NewPost, Position, PostUpdate};
use canvas_engine::commands::posts::{create_post, list_posts, list_versions, update_post};
use proptest::prelude::*;

fn title_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 ]{0,15}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_ids_unique_and_created_at_non_decreasing(
        titles in prop::collection::vec(title_strategy(), 1..12)
    ) {
        let mut conn = canvas_store::db::open_board_in_memory().unwrap();

        let mut created = Vec::new();
        for title in &titles {
            created.push(create_post(NewPost::new(title.clone(), "body"), &mut conn).unwrap());
        }

        for pair in created.windows(2) {
            prop_assert!(pair[1].id > pair[0].id);
            prop_assert!(pair[1].created_at >= pair[0].created_at);
        }

        // Listing is the exact reverse of creation order
        let listed: Vec<i64> = list_posts(&conn).unwrap().iter().map(|p| p.id).collect();
        let expected: Vec<i64> = created.iter().rev().map(|p| p.id).collect();
        prop_assert_eq!(listed, expected);
    }

    #[test]
    fn prop_update_archives_exact_previous_state(
        before in title_strategy(),
        after in title_strategy(),
        x in -1.0e6f64..1.0e6,
        y in -1.0e6f64..1.0e6,
    ) {
        let mut conn = canvas_store::db::open_board_in_memory().unwrap();
        let post = create_post(NewPost::new(before, "body"), &mut conn).unwrap();

        let updated = update_post(post.id, PostUpdate::new(after.clone(), "body", Position::new(x, y)), &mut conn).unwrap();
        prop_assert_eq!(&updated.title, &after);
        prop_assert_eq!(updated.position, Position::new(x, y));

        let versions = list_versions(post.id, &conn).unwrap();
        prop_assert_eq!(versions.len(), 1);
        prop_assert!(versions[0].captures(&post));
    }
}
