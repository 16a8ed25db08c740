//! Tasks of one project, with comments and attachments

use crate::board::{Board, ProjectTasks};
use crate::error::AppError;
use chrono::NaiveDate;
use indexmap::IndexMap;
use std::sync::Arc;
use taskflow_client::{ActivityService, CommentDraft, Part, TaskDraft, TaskService};
use taskflow_model::{Attachment, Comment, EntityId, Task, TaskStatus};
use taskflow_view::{DerivedView, FetchOutcome};

/// Task board of one project
#[derive(Debug, Clone)]
pub struct TaskBoard {
    project: EntityId,
    board: Board<Task>,
    tasks: TaskService,
    activity: ActivityService,
}

impl TaskBoard {
    /// Create an empty board for `project`
    #[must_use]
    pub fn new(project: EntityId, tasks: TaskService, activity: ActivityService) -> Self {
        let source = ProjectTasks {
            service: tasks.clone(),
            project,
        };
        Self {
            project,
            board: Board::new(Arc::new(source)),
            tasks,
            activity,
        }
    }

    /// Project shown
    #[inline]
    #[must_use]
    pub fn project(&self) -> EntityId {
        self.project
    }

    /// The filtered view
    #[inline]
    #[must_use]
    pub fn view(&self) -> &Arc<DerivedView<Task>> {
        self.board.view()
    }

    /// Re-fetch the project's tasks
    ///
    /// # Errors
    /// Fetch failure; the list is left unchanged
    pub async fn refresh(&self) -> Result<FetchOutcome, AppError> {
        self.board.refresh().await
    }

    /// Filtered tasks grouped into status columns, every column present
    #[must_use]
    pub fn columns(&self) -> IndexMap<TaskStatus, Vec<Task>> {
        let mut columns: IndexMap<TaskStatus, Vec<Task>> =
            TaskStatus::ALL.into_iter().map(|s| (s, Vec::new())).collect();
        for task in &self.view().view() {
            columns.entry(task.status).or_default().push(task.clone());
        }
        columns
    }

    /// Filtered tasks past due on `today`
    #[must_use]
    pub fn overdue(&self, today: NaiveDate) -> Vec<Task> {
        self.view()
            .view()
            .iter()
            .filter(|t| t.is_overdue(today))
            .cloned()
            .collect()
    }

    /// Create a task, then re-fetch to pick up the new id
    ///
    /// # Errors
    /// Invalid draft or backend rejection
    pub async fn create(&self, draft: &TaskDraft) -> Result<(), AppError> {
        self.tasks
            .create(self.project, draft)
            .await
            .map_err(|e| AppError::from_client(e, "create task"))?;
        self.refresh().await.map(|_| ())
    }

    /// Edit a task and patch it locally
    ///
    /// # Errors
    /// [`AppError::NotFound`] if not loaded, invalid draft, backend rejection
    pub async fn update(&self, id: EntityId, draft: &TaskDraft) -> Result<Task, AppError> {
        let current = self.board.entity(id)?;
        self.tasks
            .update(id, draft)
            .await
            .map_err(|e| AppError::from_client(e, "update task"))?;
        let patched = apply(&current, draft);
        self.view().upsert(patched.clone());
        Ok(patched)
    }

    /// Move a task to another column
    ///
    /// # Errors
    /// As [`TaskBoard::update`]
    pub async fn set_status(&self, id: EntityId, status: TaskStatus) -> Result<Task, AppError> {
        let current = self.board.entity(id)?;
        if current.status == status {
            return Ok(current);
        }
        let draft = TaskDraft::from(&current).with_status(status);
        self.update(id, &draft).await
    }

    /// Delete a task and drop it locally
    ///
    /// # Errors
    /// Backend rejection
    pub async fn delete(&self, id: EntityId) -> Result<(), AppError> {
        self.tasks
            .delete(id)
            .await
            .map_err(|e| AppError::from_client(e, "delete task"))?;
        self.view().remove(id);
        Ok(())
    }

    /// Comments on a task
    ///
    /// # Errors
    /// Fetch failure
    pub async fn comments(&self, task: EntityId) -> Result<Vec<Comment>, AppError> {
        Ok(self.activity.comments(task).await?)
    }

    /// Add a comment and return the refreshed thread
    ///
    /// # Errors
    /// Blank body or backend rejection
    pub async fn add_comment(&self, task: EntityId, body: &str) -> Result<Vec<Comment>, AppError> {
        self.activity
            .add_comment(task, &CommentDraft::new(body))
            .await
            .map_err(|e| AppError::from_client(e, "comment"))?;
        self.comments(task).await
    }

    /// Edit a comment
    ///
    /// # Errors
    /// Blank body, or 403 when the comment belongs to someone else
    pub async fn edit_comment(&self, comment: EntityId, body: &str) -> Result<(), AppError> {
        self.activity
            .update_comment(comment, &CommentDraft::new(body))
            .await
            .map_err(|e| AppError::from_client(e, "edit comment"))?;
        Ok(())
    }

    /// Delete a comment
    ///
    /// # Errors
    /// 403 when the comment belongs to someone else
    pub async fn delete_comment(&self, comment: EntityId) -> Result<(), AppError> {
        self.activity
            .delete_comment(comment)
            .await
            .map_err(|e| AppError::from_client(e, "delete comment"))
    }

    /// Comments and attachments of a task, fetched together
    ///
    /// # Errors
    /// Either fetch failing
    pub async fn activity(&self, task: EntityId) -> Result<(Vec<Comment>, Vec<Attachment>), AppError> {
        Ok(futures::try_join!(
            self.activity.comments(task),
            self.activity.attachments(task)
        )?)
    }

    /// Files attached to a task
    ///
    /// # Errors
    /// Fetch failure
    pub async fn attachments(&self, task: EntityId) -> Result<Vec<Attachment>, AppError> {
        Ok(self.activity.attachments(task).await?)
    }

    /// Upload files and return the refreshed list
    ///
    /// # Errors
    /// No files or backend rejection
    pub async fn attach(&self, task: EntityId, files: Vec<Part>) -> Result<Vec<Attachment>, AppError> {
        self.activity
            .upload(task, files)
            .await
            .map_err(|e| AppError::from_client(e, "upload attachment"))?;
        self.attachments(task).await
    }

    /// Remove an attachment
    ///
    /// # Errors
    /// Backend rejection
    pub async fn delete_attachment(&self, attachment: EntityId) -> Result<(), AppError> {
        self.activity
            .delete_attachment(attachment)
            .await
            .map_err(|e| AppError::from_client(e, "delete attachment"))
    }
}

fn apply(task: &Task, draft: &TaskDraft) -> Task {
    let mut next = task.clone();
    next.title.clone_from(&draft.title);
    next.description.clone_from(&draft.description);
    next.status = draft.status;
    next.priority = draft.priority;
    next.start_date = draft.start_date;
    next.due_date = draft.due_date;
    next.task_type = draft.task_type;
    if next.assignee_id() != draft.assignee_id {
        next.assignee_id = draft.assignee_id;
        next.assignee = None;
    }
    next
}
