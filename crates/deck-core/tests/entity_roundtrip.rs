//! Serde roundtrip and JsonSchema validation for the JSON shapes the API emits.

use chrono::{TimeZone, Utc};
use deck_core::entities::*;
use deck_core::enums::*;
use deck_core::responses::*;
use deck_core::stats::CompletionStats;
use schemars::schema_for;

fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_task() -> Task {
    let created = Utc.with_ymd_and_hms(2025, 10, 15, 9, 30, 0).unwrap();
    Task {
        id: 7,
        user_id: "usr-a3f8b2c1".into(),
        title: "Configure CI/CD pipeline".into(),
        description: Some("GitHub Actions for test and deploy".into()),
        category: Category::DevOps,
        priority: Priority::High,
        complexity: Some(Complexity::Medium),
        deadline: Some(created + chrono::Duration::days(5)),
        estimated_hours: Some(6.5),
        dependencies: vec![1, 3],
        tags: vec!["CI".into(), "Automation".into()],
        completed: true,
        completed_at: Some(created + chrono::Duration::hours(3)),
        created_at: created,
    }
}

roundtrip_and_validate!(task_roundtrip, Task, sample_task());

roundtrip_and_validate!(
    scored_task_roundtrip,
    ScoredTask,
    ScoredTask {
        task: sample_task(),
        priority_score: 124.0,
    }
);

roundtrip_and_validate!(
    toggle_response_roundtrip,
    ToggleResponse,
    ToggleResponse {
        task: sample_task(),
        completion_stats: CompletionStats::new(54, 7),
    }
);

roundtrip_and_validate!(
    task_list_roundtrip,
    TaskListResponse,
    TaskListResponse {
        items: vec![ScoredTask {
            task: sample_task(),
            priority_score: 99.0,
        }],
        pagination: Pagination {
            page: 1,
            page_size: 10,
            total: 1,
            total_pages: 1,
            has_more: false,
        },
    }
);

roundtrip_and_validate!(
    user_roundtrip,
    User,
    User {
        id: "usr-a3f8b2c1".into(),
        email: "dev@example.com".into(),
        name: None,
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    login_response_roundtrip,
    LoginResponse,
    LoginResponse {
        token: "ab".repeat(32),
        expires_at: Utc::now(),
    }
);

#[test]
fn scored_task_flattens_into_camel_case() {
    let scored = ScoredTask {
        task: sample_task(),
        priority_score: 12.5,
    };
    let value = serde_json::to_value(&scored).unwrap();
    assert_eq!(value["priorityScore"], 12.5);
    assert_eq!(value["estimatedHours"], 6.5);
    assert_eq!(value["category"], "DevOps");
    assert_eq!(value["priority"], "HIGH");
    assert!(value.get("task").is_none());
}
