// Built-in demo tasks used when no seed file is given

use crate::models::{Priority, Task, TaskStatus};

pub fn demo_tasks() -> Vec<Task> {
    vec![
        Task::new("1", "Design new landing page", Priority::High, TaskStatus::InProgress)
            .with_description("Create a modern and responsive landing page for the new product launch")
            .with_due_date("2025-07-08")
            .with_assignee("Manickam")
            .with_tags(["design", "frontend"]),
        Task::new("2", "Implement user authentication", Priority::High, TaskStatus::Todo)
            .with_description("Set up OAuth integration with Google, GitHub, and Facebook")
            .with_due_date("2025-07-10")
            .with_assignee("Manickam")
            .with_tags(["backend", "auth"]),
        Task::new("3", "Write API documentation", Priority::Medium, TaskStatus::Todo)
            .with_description("Document all REST endpoints for the task management API")
            .with_due_date("2025-07-12")
            .with_assignee("Manickam")
            .with_tags(["documentation", "api"]),
        Task::new("4", "Setup CI/CD pipeline", Priority::Medium, TaskStatus::Completed)
            .with_description("Configure automated testing and deployment workflows")
            .with_due_date("2025-07-05")
            .with_assignee("Manickam")
            .with_tags(["devops", "automation"]),
        Task::new("5", "Database optimization", Priority::Low, TaskStatus::Todo)
            .with_description("Optimize database queries and add proper indexing")
            .with_due_date("2025-07-15")
            .with_assignee("Manickam")
            .with_tags(["database", "performance"]),
    ]
}
