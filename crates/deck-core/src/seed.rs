//! Engineering task catalogue seeded for every new account.
//!
//! Deadlines are stored as day offsets from the seeding moment. A task
//! without a deadline gets one `DEFAULT_DEADLINE_DAYS` after creation.
//! Dependencies name other entries by catalogue `number`; they are remapped
//! to storage ids after insertion and unknown numbers are dropped.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::entities::NewTask;
use crate::enums::{Category, Complexity, Priority};

pub const DEFAULT_DEADLINE_DAYS: i64 = 14;

/// One catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedTask {
    pub number: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub priority: Priority,
    pub complexity: Option<Complexity>,
    pub deadline_in_days: Option<i64>,
    pub dependencies: &'static [u32],
    pub tags: &'static [&'static str],
    pub estimated_hours: Option<f64>,
}

impl SeedTask {
    /// Build the insert payload. Dependencies are left empty; see
    /// [`resolve_dependencies`].
    #[must_use]
    pub fn to_new_task(&self, now: DateTime<Utc>) -> NewTask {
        let days = self.deadline_in_days.unwrap_or(DEFAULT_DEADLINE_DAYS);
        NewTask {
            title: self.title.to_string(),
            description: Some(self.description.to_string()),
            category: Some(self.category),
            priority: Some(self.priority),
            complexity: self.complexity,
            deadline: Some(now + Duration::days(days)),
            estimated_hours: self.estimated_hours,
            dependencies: Vec::new(),
            tags: self.tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

/// Map catalogue numbers to storage ids, dropping numbers that were never
/// inserted.
#[must_use]
pub fn resolve_dependencies(seed: &SeedTask, ids: &HashMap<u32, i64>) -> Vec<i64> {
    seed.dependencies
        .iter()
        .filter_map(|number| ids.get(number).copied())
        .collect()
}

#[must_use]
pub const fn catalogue() -> &'static [SeedTask] {
    CATALOGUE
}

const CATALOGUE: &[SeedTask] = &[
    SeedTask {
        number: 1,
        title: "Implement REST API authentication with JWT",
        description: "Setup JWT-based authentication with refresh tokens",
        category: Category::Backend,
        priority: Priority::Critical,
        complexity: Some(Complexity::High),
        deadline_in_days: Some(5),
        dependencies: &[],
        tags: &["API", "Auth", "Security", "JWT"],
        estimated_hours: Some(8.0),
    },
    SeedTask {
        number: 2,
        title: "Optimize database queries with indexing",
        description: "Add indexes to frequently queried columns",
        category: Category::Backend,
        priority: Priority::High,
        complexity: Some(Complexity::Medium),
        deadline_in_days: Some(10),
        dependencies: &[],
        tags: &["Database", "Performance", "SQL"],
        estimated_hours: Some(6.0),
    },
    SeedTask {
        number: 3,
        title: "Create GraphQL schema for user management",
        description: "Design GraphQL types and resolvers",
        category: Category::Backend,
        priority: Priority::Medium,
        complexity: Some(Complexity::Medium),
        deadline_in_days: Some(10),
        dependencies: &[1],
        tags: &["GraphQL", "API", "Schema"],
        estimated_hours: Some(5.0),
    },
    SeedTask {
        number: 4,
        title: "Setup Redis caching layer",
        description: "Implement Redis for session and query caching",
        category: Category::Backend,
        priority: Priority::High,
        complexity: Some(Complexity::Medium),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Cache", "Performance", "Redis"],
        estimated_hours: Some(4.0),
    },
    SeedTask {
        number: 5,
        title: "Implement rate limiting middleware",
        description: "Add rate limiting to prevent abuse",
        category: Category::Backend,
        priority: Priority::High,
        complexity: Some(Complexity::Low),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Security", "Middleware", "Express"],
        estimated_hours: Some(3.0),
    },
    SeedTask {
        number: 6,
        title: "Setup WebSocket server for real-time updates",
        description: "Enable real-time task updates",
        category: Category::Backend,
        priority: Priority::Medium,
        complexity: Some(Complexity::High),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["WebSocket", "Real-time", "Socket.io"],
        estimated_hours: Some(7.0),
    },
    SeedTask {
        number: 7,
        title: "Create API documentation with Swagger",
        description: "Auto-generate API docs",
        category: Category::Backend,
        priority: Priority::Low,
        complexity: Some(Complexity::Low),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Documentation", "API", "Swagger"],
        estimated_hours: Some(4.0),
    },
    SeedTask {
        number: 8,
        title: "Implement file upload with S3",
        description: "Add file attachment support",
        category: Category::Backend,
        priority: Priority::Medium,
        complexity: Some(Complexity::Medium),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Storage", "AWS", "Upload"],
        estimated_hours: Some(5.0),
    },
    SeedTask {
        number: 9,
        title: "Setup error tracking with Sentry",
        description: "Track and alert on server errors",
        category: Category::Backend,
        priority: Priority::High,
        complexity: Some(Complexity::Low),
        deadline_in_days: Some(3),
        dependencies: &[],
        tags: &["Monitoring", "Errors", "Sentry"],
        estimated_hours: Some(2.0),
    },
    SeedTask {
        number: 10,
        title: "Create database migration system",
        description: "Setup Knex.js migrations",
        category: Category::Backend,
        priority: Priority::High,
        complexity: Some(Complexity::Medium),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Database", "Migration", "Version Control"],
        estimated_hours: Some(5.0),
    },
    SeedTask {
        number: 11,
        title: "Implement background job queue",
        description: "Setup Bull for async tasks",
        category: Category::Backend,
        priority: Priority::Medium,
        complexity: Some(Complexity::High),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Queue", "Bull", "Jobs"],
        estimated_hours: Some(6.0),
    },
    SeedTask {
        number: 12,
        title: "Add API versioning strategy",
        description: "Implement /v1/, /v2/ routing",
        category: Category::Backend,
        priority: Priority::Low,
        complexity: Some(Complexity::Low),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["API", "Versioning", "REST"],
        estimated_hours: Some(3.0),
    },
    SeedTask {
        number: 13,
        title: "Build responsive navigation with mobile menu",
        description: "Create hamburger menu for mobile",
        category: Category::Frontend,
        priority: Priority::High,
        complexity: Some(Complexity::Medium),
        deadline_in_days: Some(3),
        dependencies: &[],
        tags: &["React", "UI", "Responsive"],
        estimated_hours: Some(5.0),
    },
    SeedTask {
        number: 14,
        title: "Implement dark mode with system preference",
        description: "Toggle between light/dark themes",
        category: Category::Frontend,
        priority: Priority::High,
        complexity: Some(Complexity::Low),
        deadline_in_days: Some(1),
        dependencies: &[],
        tags: &["UI", "Accessibility", "Theme"],
        estimated_hours: Some(3.0),
    },
    SeedTask {
        number: 15,
        title: "Create reusable form validation hooks",
        description: "Custom useForm hook with validation",
        category: Category::Frontend,
        priority: Priority::Medium,
        complexity: Some(Complexity::Medium),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["React", "Hooks", "Forms"],
        estimated_hours: Some(4.0),
    },
    SeedTask {
        number: 16,
        title: "Optimize bundle size with code splitting",
        description: "Dynamic imports and lazy loading",
        category: Category::Frontend,
        priority: Priority::High,
        complexity: Some(Complexity::High),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Performance", "Webpack", "Optimization"],
        estimated_hours: Some(6.0),
    },
    SeedTask {
        number: 17,
        title: "Add skeleton loading states",
        description: "Shimmer placeholders while loading",
        category: Category::Frontend,
        priority: Priority::Low,
        complexity: Some(Complexity::Low),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["UI", "UX", "Loading"],
        estimated_hours: Some(2.0),
    },
    SeedTask {
        number: 18,
        title: "Implement infinite scroll with virtualization",
        description: "Virtual scrolling for 1000+ items",
        category: Category::Frontend,
        priority: Priority::Critical,
        complexity: Some(Complexity::High),
        deadline_in_days: Some(2),
        dependencies: &[],
        tags: &["Performance", "UX", "Scroll"],
        estimated_hours: Some(7.0),
    },
    SeedTask {
        number: 19,
        title: "Create toast notification system",
        description: "Success/error/warning toasts",
        category: Category::Frontend,
        priority: Priority::Medium,
        complexity: Some(Complexity::Low),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["UI", "Notifications", "UX"],
        estimated_hours: Some(3.0),
    },
    SeedTask {
        number: 20,
        title: "Add drag-and-drop task reordering",
        description: "Drag tasks to change priority",
        category: Category::Frontend,
        priority: Priority::Low,
        complexity: Some(Complexity::High),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["UI", "Interaction", "DnD"],
        estimated_hours: Some(8.0),
    },
    SeedTask {
        number: 21,
        title: "Implement search with debouncing",
        description: "Filter tasks by keyword",
        category: Category::Frontend,
        priority: Priority::Medium,
        complexity: Some(Complexity::Low),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Search", "UX", "Performance"],
        estimated_hours: Some(3.0),
    },
    SeedTask {
        number: 22,
        title: "Create animated progress bars",
        description: "Visual task completion indicators",
        category: Category::Frontend,
        priority: Priority::Low,
        complexity: Some(Complexity::Low),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Animation", "UI", "Progress"],
        estimated_hours: Some(2.0),
    },
    SeedTask {
        number: 23,
        title: "Add keyboard shortcuts",
        description: "Hotkeys for common actions",
        category: Category::Frontend,
        priority: Priority::Medium,
        complexity: Some(Complexity::Medium),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Accessibility", "UX", "Keyboard"],
        estimated_hours: Some(4.0),
    },
    SeedTask {
        number: 24,
        title: "Implement error boundaries",
        description: "Graceful error handling",
        category: Category::Frontend,
        priority: Priority::High,
        complexity: Some(Complexity::Low),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Error", "React", "Stability"],
        estimated_hours: Some(2.0),
    },
    SeedTask {
        number: 25,
        title: "Create multi-select with bulk actions",
        description: "Select multiple tasks for batch operations",
        category: Category::Frontend,
        priority: Priority::Medium,
        complexity: Some(Complexity::Medium),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["UI", "UX", "Bulk"],
        estimated_hours: Some(5.0),
    },
    SeedTask {
        number: 26,
        title: "Add data export to CSV/JSON",
        description: "Download tasks as file",
        category: Category::Frontend,
        priority: Priority::Low,
        complexity: Some(Complexity::Low),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Export", "Data", "Download"],
        estimated_hours: Some(3.0),
    },
    SeedTask {
        number: 27,
        title: "Implement accessibility audit fixes",
        description: "WCAG 2.1 AA compliance",
        category: Category::Frontend,
        priority: Priority::High,
        complexity: Some(Complexity::Medium),
        deadline_in_days: Some(4),
        dependencies: &[],
        tags: &["Accessibility", "WCAG", "A11y"],
        estimated_hours: Some(6.0),
    },
    SeedTask {
        number: 28,
        title: "Setup CI/CD pipeline with GitHub Actions",
        description: "Automated testing and deployment",
        category: Category::DevOps,
        priority: Priority::Critical,
        complexity: Some(Complexity::High),
        deadline_in_days: Some(4),
        dependencies: &[],
        tags: &["CI/CD", "Automation", "GitHub"],
        estimated_hours: Some(8.0),
    },
    SeedTask {
        number: 29,
        title: "Configure Docker multi-stage builds",
        description: "Reduce image size by 70%",
        category: Category::DevOps,
        priority: Priority::High,
        complexity: Some(Complexity::Medium),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Docker", "Optimization", "Container"],
        estimated_hours: Some(4.0),
    },
    SeedTask {
        number: 30,
        title: "Implement blue-green deployment",
        description: "Zero-downtime deployments",
        category: Category::DevOps,
        priority: Priority::Medium,
        complexity: Some(Complexity::High),
        deadline_in_days: None,
        dependencies: &[28],
        tags: &["Deployment", "Kubernetes", "Zero-downtime"],
        estimated_hours: Some(10.0),
    },
    SeedTask {
        number: 31,
        title: "Setup monitoring with Prometheus + Grafana",
        description: "Real-time metrics dashboards",
        category: Category::DevOps,
        priority: Priority::High,
        complexity: Some(Complexity::Medium),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Monitoring", "Observability", "Metrics"],
        estimated_hours: Some(5.0),
    },
    SeedTask {
        number: 32,
        title: "Configure auto-scaling policies",
        description: "Scale based on CPU/memory",
        category: Category::DevOps,
        priority: Priority::Medium,
        complexity: Some(Complexity::Medium),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Scalability", "Cloud", "Auto-scale"],
        estimated_hours: Some(4.0),
    },
    SeedTask {
        number: 33,
        title: "Implement log aggregation with ELK",
        description: "Centralized log management",
        category: Category::DevOps,
        priority: Priority::Medium,
        complexity: Some(Complexity::High),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Logging", "ELK", "Debugging"],
        estimated_hours: Some(7.0),
    },
    SeedTask {
        number: 34,
        title: "Setup infrastructure as code with Terraform",
        description: "Version-controlled infrastructure",
        category: Category::DevOps,
        priority: Priority::Low,
        complexity: Some(Complexity::High),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["IaC", "Terraform", "Automation"],
        estimated_hours: Some(9.0),
    },
    SeedTask {
        number: 35,
        title: "Create disaster recovery plan",
        description: "Backup and recovery procedures",
        category: Category::DevOps,
        priority: Priority::High,
        complexity: Some(Complexity::Medium),
        deadline_in_days: Some(6),
        dependencies: &[],
        tags: &["DR", "Backup", "Resilience"],
        estimated_hours: Some(6.0),
    },
    SeedTask {
        number: 36,
        title: "Implement secret management with Vault",
        description: "Secure credential storage",
        category: Category::DevOps,
        priority: Priority::High,
        complexity: Some(Complexity::Medium),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Security", "Secrets", "Vault"],
        estimated_hours: Some(5.0),
    },
    SeedTask {
        number: 37,
        title: "Setup performance testing with k6",
        description: "Automated load testing",
        category: Category::DevOps,
        priority: Priority::Medium,
        complexity: Some(Complexity::Low),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Testing", "Performance", "Load"],
        estimated_hours: Some(3.0),
    },
    SeedTask {
        number: 38,
        title: "Configure CDN with CloudFlare",
        description: "Global content delivery",
        category: Category::DevOps,
        priority: Priority::Medium,
        complexity: Some(Complexity::Low),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["CDN", "Performance", "CloudFlare"],
        estimated_hours: Some(3.0),
    },
    SeedTask {
        number: 39,
        title: "Implement health checks and readiness probes",
        description: "Service health monitoring",
        category: Category::DevOps,
        priority: Priority::High,
        complexity: Some(Complexity::Low),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Health", "Monitoring", "K8s"],
        estimated_hours: Some(2.0),
    },
    SeedTask {
        number: 40,
        title: "Design database normalization strategy",
        description: "3NF normalization for efficiency",
        category: Category::Database,
        priority: Priority::High,
        complexity: Some(Complexity::High),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Schema", "Optimization", "Design"],
        estimated_hours: Some(6.0),
    },
    SeedTask {
        number: 41,
        title: "Implement database backup automation",
        description: "Hourly incremental backups",
        category: Category::Database,
        priority: Priority::Critical,
        complexity: Some(Complexity::Medium),
        deadline_in_days: Some(6),
        dependencies: &[],
        tags: &["Backup", "DR", "Automation"],
        estimated_hours: Some(5.0),
    },
    SeedTask {
        number: 42,
        title: "Setup database replication (master-slave)",
        description: "High availability setup",
        category: Category::Database,
        priority: Priority::High,
        complexity: Some(Complexity::High),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["HA", "Replication", "Redundancy"],
        estimated_hours: Some(8.0),
    },
    SeedTask {
        number: 43,
        title: "Create migration scripts for schema changes",
        description: "Safe schema evolution",
        category: Category::Database,
        priority: Priority::Medium,
        complexity: Some(Complexity::Low),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Migration", "Version Control", "Schema"],
        estimated_hours: Some(3.0),
    },
    SeedTask {
        number: 44,
        title: "Optimize slow queries with EXPLAIN ANALYZE",
        description: "Identify and fix bottlenecks",
        category: Category::Database,
        priority: Priority::High,
        complexity: Some(Complexity::Medium),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Performance", "Tuning", "SQL"],
        estimated_hours: Some(4.0),
    },
    SeedTask {
        number: 45,
        title: "Implement database connection pooling",
        description: "Reuse connections efficiently",
        category: Category::Database,
        priority: Priority::High,
        complexity: Some(Complexity::Low),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Performance", "Connections", "Pooling"],
        estimated_hours: Some(2.0),
    },
    SeedTask {
        number: 46,
        title: "Setup database monitoring and alerts",
        description: "Track performance metrics",
        category: Category::Database,
        priority: Priority::Medium,
        complexity: Some(Complexity::Medium),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Monitoring", "Alerts", "Observability"],
        estimated_hours: Some(4.0),
    },
    SeedTask {
        number: 47,
        title: "Create database seeding scripts",
        description: "Populate test data",
        category: Category::Database,
        priority: Priority::Low,
        complexity: Some(Complexity::Low),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Testing", "Seed", "Development"],
        estimated_hours: Some(2.0),
    },
    SeedTask {
        number: 48,
        title: "Implement OAuth 2.0 with Google/GitHub",
        description: "Social login integration",
        category: Category::Security,
        priority: Priority::Critical,
        complexity: Some(Complexity::High),
        deadline_in_days: Some(8),
        dependencies: &[],
        tags: &["Auth", "OAuth", "SSO"],
        estimated_hours: Some(10.0),
    },
    SeedTask {
        number: 49,
        title: "Add CSRF protection middleware",
        description: "Prevent cross-site attacks",
        category: Category::Security,
        priority: Priority::High,
        complexity: Some(Complexity::Low),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["Security", "Web", "CSRF"],
        estimated_hours: Some(2.0),
    },
    SeedTask {
        number: 50,
        title: "Conduct security audit and penetration testing",
        description: "Find and fix vulnerabilities",
        category: Category::Security,
        priority: Priority::High,
        complexity: Some(Complexity::High),
        deadline_in_days: Some(11),
        dependencies: &[],
        tags: &["Audit", "Testing", "PenTest"],
        estimated_hours: Some(12.0),
    },
    SeedTask {
        number: 51,
        title: "Implement input sanitization for XSS prevention",
        description: "Sanitize all user inputs",
        category: Category::Security,
        priority: Priority::Critical,
        complexity: Some(Complexity::Medium),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["XSS", "Validation", "Sanitization"],
        estimated_hours: Some(4.0),
    },
    SeedTask {
        number: 52,
        title: "Setup SSL/TLS with auto-renewal",
        description: "Let's Encrypt automation",
        category: Category::Security,
        priority: Priority::High,
        complexity: Some(Complexity::Low),
        deadline_in_days: Some(2),
        dependencies: &[],
        tags: &["SSL", "Encryption", "Certificates"],
        estimated_hours: Some(2.0),
    },
    SeedTask {
        number: 53,
        title: "Implement Content Security Policy headers",
        description: "Prevent XSS and injection attacks",
        category: Category::Security,
        priority: Priority::Medium,
        complexity: Some(Complexity::Low),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["CSP", "Headers", "Security"],
        estimated_hours: Some(3.0),
    },
    SeedTask {
        number: 54,
        title: "Add two-factor authentication (2FA)",
        description: "TOTP-based 2FA",
        category: Category::Security,
        priority: Priority::Medium,
        complexity: Some(Complexity::High),
        deadline_in_days: None,
        dependencies: &[],
        tags: &["2FA", "Auth", "Security"],
        estimated_hours: Some(8.0),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn catalogue_has_54_unique_entries() {
        let numbers: HashSet<u32> = catalogue().iter().map(|s| s.number).collect();
        assert_eq!(catalogue().len(), 54);
        assert_eq!(numbers.len(), 54);
    }

    #[test]
    fn every_entry_normalizes() {
        let now = Utc::now();
        for seed in catalogue() {
            assert!(
                seed.to_new_task(now).normalize().is_ok(),
                "seed {} failed validation",
                seed.number
            );
        }
    }

    #[test]
    fn missing_deadline_defaults_to_two_weeks() {
        let now = Utc.with_ymd_and_hms(2025, 10, 15, 0, 0, 0).unwrap();
        let seed = catalogue()
            .iter()
            .find(|s| s.deadline_in_days.is_none())
            .expect("catalogue has an entry without a deadline");
        assert_eq!(
            seed.to_new_task(now).deadline,
            Some(now + Duration::days(DEFAULT_DEADLINE_DAYS))
        );
    }

    #[test]
    fn dangling_dependencies_are_dropped() {
        let seed = SeedTask {
            dependencies: &[1, 99],
            ..catalogue()[0]
        };
        let ids = HashMap::from([(1, 501)]);
        assert_eq!(resolve_dependencies(&seed, &ids), vec![501]);
    }
}
