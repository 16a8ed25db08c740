use chrono::NaiveDate;
use serde_json::Value;
use taskflow_model::{
    Category, EntityId, Priority, Project, ProjectStatus, Role, Task, TaskStatus, TaskType, User,
    UserSummary,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Seed categories, ids 1 through 7
pub fn categories() -> Vec<Category> {
    [
        "Development",
        "Design",
        "Marketing",
        "Sales",
        "Support",
        "Operations",
        "Research",
    ]
    .into_iter()
    .zip(1u64..)
    .map(|(name, id)| Category {
        id: EntityId(id),
        name: name.to_string(),
    })
    .collect()
}

pub fn category(name: &str) -> Category {
    categories().into_iter().find(|c| c.name == name).unwrap()
}

pub fn admin() -> User {
    let mut user = User::new(EntityId(1), "Admin User", "admin@taskflow.com")
        .with_role(Role::Administrator);
    user.avatar_url = Some("/admin-avatar.png".into());
    user.position = Some("admin".into());
    user
}

/// Four seed users: the root administrator, one manager and two members
pub fn users() -> Vec<User> {
    let member = |id: u64, name: &str, email: &str, avatar: &str, role: Role| {
        let mut user = User::new(EntityId(id), name, email).with_role(role);
        user.avatar_url = Some(avatar.into());
        user.position = Some("user".into());
        user
    };
    vec![
        admin(),
        member(2, "João Silva", "joao@taskflow.com", "/male-avatar.png", Role::Manager),
        member(
            3,
            "Maria Santos",
            "maria@taskflow.com",
            "/diverse-female-avatar.png",
            Role::Member,
        ),
        member(4, "Pedro Costa", "pedro@taskflow.com", "/male-avatar-2.png", Role::Member),
    ]
}

pub fn session_user(id: u64) -> User {
    users().into_iter().find(|u| u.id == EntityId(id)).unwrap()
}

fn summary(id: u64) -> UserSummary {
    session_user(id).summary()
}

/// Four seed projects; "Database Migration" is done, the rest active
pub fn projects() -> Vec<Project> {
    let project = |id: u64,
                   name: &str,
                   description: &str,
                   category_name: &str,
                   progress: u8,
                   status: ProjectStatus,
                   manager: u64,
                   members: &[u64],
                   created: NaiveDate,
                   due: NaiveDate| {
        let mut project = Project::new(EntityId(id), name)
            .with_description(description)
            .with_category(category(category_name))
            .with_status(status)
            .with_manager(summary(manager));
        project.progress = Some(progress);
        project.member_ids = members.iter().copied().map(EntityId).collect();
        project.start_date = Some(created);
        project.created_at = Some(created);
        project.end_date = Some(due);
        project
    };
    vec![
        project(
            1,
            "Website Redesign",
            "Complete redesign of company website with modern UI/UX",
            "Design",
            65,
            ProjectStatus::Active,
            2,
            &[2, 3],
            day(2025, 1, 15),
            day(2025, 3, 1),
        ),
        project(
            2,
            "Mobile App Development",
            "Native mobile app for iOS and Android",
            "Development",
            40,
            ProjectStatus::Active,
            3,
            &[3, 4],
            day(2025, 1, 20),
            day(2025, 4, 15),
        ),
        project(
            3,
            "Marketing Campaign",
            "Q1 2025 marketing campaign planning and execution",
            "Marketing",
            85,
            ProjectStatus::Active,
            2,
            &[2, 3, 4],
            day(2025, 1, 10),
            day(2025, 2, 28),
        ),
        project(
            4,
            "Database Migration",
            "Migrate legacy database to new infrastructure",
            "Development",
            100,
            ProjectStatus::Done,
            4,
            &[4],
            day(2024, 12, 1),
            day(2025, 1, 15),
        ),
    ]
}

/// Six seed tasks spread over projects 1 to 3
pub fn tasks() -> Vec<Task> {
    let task = |id: u64,
                title: &str,
                description: &str,
                project: u64,
                assignee: u64,
                status: TaskStatus,
                priority: Priority,
                task_type: TaskType,
                created: NaiveDate,
                due: NaiveDate| {
        let mut task = Task::new(EntityId(id), title)
            .with_status(status)
            .with_priority(priority)
            .with_assignee(EntityId(assignee));
        task.description = Some(description.into());
        task.project_id = Some(EntityId(project));
        task.task_type = Some(task_type);
        task.created_at = Some(created);
        task.due_date = Some(due);
        task
    };
    vec![
        task(
            1,
            "Design homepage mockup",
            "Create high-fidelity mockup for new homepage",
            1,
            3,
            TaskStatus::Completed,
            Priority::High,
            TaskType::Feature,
            day(2025, 1, 15),
            day(2025, 1, 25),
        ),
        task(
            2,
            "Implement responsive navigation",
            "Build mobile-responsive navigation component",
            1,
            2,
            TaskStatus::InProgress,
            Priority::High,
            TaskType::Feature,
            day(2025, 1, 20),
            day(2025, 2, 5),
        ),
        task(
            3,
            "Setup development environment",
            "Configure React Native development environment",
            2,
            4,
            TaskStatus::Completed,
            Priority::High,
            TaskType::Others,
            day(2025, 1, 20),
            day(2025, 1, 25),
        ),
        task(
            4,
            "Design app screens",
            "Create UI designs for all app screens",
            2,
            3,
            TaskStatus::InProgress,
            Priority::Medium,
            TaskType::Feature,
            day(2025, 1, 22),
            day(2025, 2, 10),
        ),
        task(
            5,
            "Create social media content",
            "Design and schedule social media posts",
            3,
            2,
            TaskStatus::InProgress,
            Priority::Medium,
            TaskType::Others,
            day(2025, 1, 10),
            day(2025, 2, 15),
        ),
        task(
            6,
            "Launch email campaign",
            "Send out Q1 promotional emails",
            3,
            3,
            TaskStatus::Todo,
            Priority::High,
            TaskType::Others,
            day(2025, 1, 15),
            day(2025, 2, 20),
        ),
    ]
}

pub fn tasks_for(project: u64) -> Vec<Task> {
    tasks()
        .into_iter()
        .filter(|t| t.project_id == Some(EntityId(project)))
        .collect()
}

pub fn projects_json() -> Value {
    serde_json::to_value(projects()).unwrap()
}

pub fn project_json(id: u64) -> Value {
    let project = projects().into_iter().find(|p| p.id == EntityId(id)).unwrap();
    serde_json::to_value(project).unwrap()
}

pub fn tasks_json(project: u64) -> Value {
    serde_json::to_value(tasks_for(project)).unwrap()
}

pub fn users_json() -> Value {
    serde_json::to_value(users()).unwrap()
}

pub fn user_json(id: u64) -> Value {
    serde_json::to_value(session_user(id)).unwrap()
}
