//! Integration tests for `GET /api/insights`.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use serde_json::{json, Value};
use sqlx::PgPool;

fn achievement<'a>(insights: &'a Value, id: &str) -> &'a Value {
    insights["achievements"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["id"] == id)
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn insights_on_empty_store(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/insights").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let insights = &json["data"];
    assert_eq!(insights["totalHabits"], 0);
    assert_eq!(insights["completionRate"], 0.0);
    assert_eq!(insights["achievements"].as_array().unwrap().len(), 5);
    assert_eq!(achievement(insights, "getting-started")["unlocked"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn insights_reflect_completions_and_categories(pool: PgPool) {
    let mut category_ids = Vec::new();
    for name in ["Health", "Work", "Home"] {
        let category = common::create_category(&pool, json!({"name": name})).await;
        category_ids.push(category["id"].clone());
    }

    let runner = common::create_habit(&pool, json!({"title": "Run", "category": category_ids[0]})).await;
    common::create_habit(&pool, json!({"title": "Inbox", "category": category_ids[1]})).await;
    common::create_habit(&pool, json!({"title": "Dishes", "category": category_ids[2]})).await;

    let id = runner["id"].as_str().unwrap();
    for _ in 0..3 {
        common::set_completed(&pool, id, true).await;
    }

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/insights").await).await;
    let insights = &json["data"];

    assert_eq!(insights["totalHabits"], 3);
    assert_eq!(insights["completedHabits"], 1);
    assert_eq!(insights["highestStreak"], 3);
    assert_eq!(insights["totalCompletions"], 3);

    assert_eq!(achievement(insights, "getting-started")["unlocked"], true);
    assert_eq!(achievement(insights, "on-a-roll")["unlocked"], true);
    assert!(achievement(insights, "on-a-roll")["unlockedAt"].is_string());
    assert_eq!(achievement(insights, "consistent")["unlocked"], false);
    assert!(achievement(insights, "consistent")["unlockedAt"].is_null());
    assert_eq!(achievement(insights, "diversifying")["unlocked"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn streak_milestones_survive_a_reset(pool: PgPool) {
    let habit = common::create_habit(&pool, json!({"title": "Meditate"})).await;
    let id = habit["id"].as_str().unwrap();
    for _ in 0..3 {
        common::set_completed(&pool, id, true).await;
    }
    let reset = common::set_completed(&pool, id, false).await;
    assert_eq!(reset["streak"], 0);
    assert_eq!(reset["bestStreak"], 3);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/insights").await).await;
    let insights = &json["data"];

    assert_eq!(insights["highestStreak"], 3);
    assert_eq!(achievement(insights, "on-a-roll")["unlocked"], true);
    assert_eq!(achievement(insights, "consistent")["unlocked"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completions_today_count_in_weekly_and_monthly_rates(pool: PgPool) {
    let done = common::create_habit(&pool, json!({"title": "Floss"})).await;
    common::create_habit(&pool, json!({"title": "Journal"})).await;
    let id = done["id"].as_str().unwrap();
    common::set_completed(&pool, id, true).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/insights").await).await;
    let insights = &json["data"];

    // One habit-day out of 2 habits x 7 (or 30) days.
    assert_eq!(insights["weeklyCompletionRate"], 1.0 / 14.0);
    assert_eq!(insights["monthlyCompletionRate"], 1.0 / 60.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleted_categories_do_not_count_towards_diversifying(pool: PgPool) {
    let mut category_ids = Vec::new();
    for name in ["Health", "Work", "Home"] {
        let category = common::create_category(&pool, json!({"name": name})).await;
        common::create_habit(&pool, json!({"title": name, "category": category["id"]})).await;
        category_ids.push(category["id"].as_str().unwrap().to_string());
    }

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/insights").await).await;
    assert_eq!(achievement(&json["data"], "diversifying")["unlocked"], true);

    let app = common::build_test_app(pool.clone());
    let response = common::delete(app, &format!("/api/categories/{}", category_ids[2])).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/insights").await).await;
    assert_eq!(achievement(&json["data"], "diversifying")["unlocked"], false);
}
