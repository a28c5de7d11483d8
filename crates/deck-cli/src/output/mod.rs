use serde::Serialize;
use serde_json::Value;

use deck_core::entities::ScoredTask;
use deck_core::responses::TaskListResponse;

use crate::cli::OutputFormat;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_value_table(&serde_json::to_value(value)?)),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print a task page. Tables get task columns and a pagination footer.
pub fn output_task_page(page: &TaskListResponse, format: OutputFormat) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return output(page, format);
    }
    let p = &page.pagination;
    println!(
        "{}\npage {}/{} ({} tasks{})",
        render_task_rows(&page.items),
        p.page,
        p.total_pages,
        p.total,
        if p.has_more { ", more available" } else { "" }
    );
    Ok(())
}

/// Task columns in a fixed, readable order.
#[must_use]
pub fn render_task_rows(items: &[ScoredTask]) -> String {
    if items.is_empty() {
        return String::from("(no tasks)");
    }
    let headers = ["id", "score", "priority", "category", "due", "done", "title"];
    let rows = items
        .iter()
        .map(|scored| {
            let task = &scored.task;
            vec![
                task.id.to_string(),
                format!("{:.0}", scored.priority_score),
                task.priority.to_string(),
                task.category.to_string(),
                task.deadline
                    .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string()),
                if task.completed { "yes" } else { "no" }.to_string(),
                task.title.clone(),
            ]
        })
        .collect::<Vec<_>>();
    table::render_table(&headers, &rows, term_width())
}

fn term_width() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40)
}

fn render_value_table(value: &Value) -> String {
    match value {
        Value::Array(items) => render_array_table(items),
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
                .collect::<Vec<_>>();
            table::render_table(&["key", "value"], &rows, term_width())
        }
        scalar => value_to_cell(scalar),
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if headers.is_empty() {
        let rows = items.iter().map(|v| vec![value_to_cell(v)]).collect::<Vec<_>>();
        return table::render_table(&["value"], &rows, term_width());
    }

    let rows = items
        .iter()
        .map(|item| {
            headers
                .iter()
                .map(|h| item.get(h).map_or_else(|| "-".to_string(), value_to_cell))
                .collect()
        })
        .collect::<Vec<Vec<String>>>();
    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    table::render_table(&header_refs, &rows, term_width())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(v) => v.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Stats {
        total_tasks: u64,
        completion_percentage: u8,
    }

    #[test]
    fn json_render_is_pretty() {
        let value = Stats {
            total_tasks: 54,
            completion_percentage: 11,
        };
        let out = render(&value, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["totalTasks"], 54);
        assert!(out.contains('\n'));
    }

    #[test]
    fn raw_render_is_single_line() {
        let value = Stats {
            total_tasks: 54,
            completion_percentage: 11,
        };
        let out = render(&value, OutputFormat::Raw).unwrap();
        assert!(!out.contains('\n'));
    }

    #[test]
    fn object_table_lists_keys() {
        let value = Stats {
            total_tasks: 54,
            completion_percentage: 11,
        };
        let out = render(&value, OutputFormat::Table).unwrap();
        assert!(out.lines().next().is_some_and(|l| l.contains("key")));
        assert!(out.contains("totalTasks"));
        assert!(out.contains("completionPercentage"));
    }

    #[test]
    fn empty_array_table_says_so() {
        let out = render(&Vec::<Stats>::new(), OutputFormat::Table).unwrap();
        assert_eq!(out, "(no rows)");
    }
}
