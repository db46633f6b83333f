use anyhow::anyhow;
use classpulse_core::{AppError, codes};
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use super::model::{CreateQuestionDto, Question, UpdateQuestionDto};

const QUESTION_COLUMNS: &str = "id, title, description, question_type, options, required, \
     sort_order, is_active, created_at, updated_at";

fn question_not_found() -> AppError {
    AppError::not_found(anyhow!("Question not found")).with_code(codes::QUESTION_NOT_FOUND)
}

pub struct QuestionService;

impl QuestionService {
    #[instrument(skip(db))]
    pub async fn list_questions(db: &PgPool, active_only: bool) -> Result<Vec<Question>, AppError> {
        let questions = sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS}
             FROM questions
             WHERE ($1 = false OR is_active = true)
             ORDER BY sort_order ASC, created_at ASC"
        ))
        .bind(active_only)
        .fetch_all(db)
        .await?;
        Ok(questions)
    }

    #[instrument(skip(db, dto), fields(title = %dto.title))]
    pub async fn create_question(
        db: &PgPool,
        dto: CreateQuestionDto,
    ) -> Result<Question, AppError> {
        let question = sqlx::query_as::<_, Question>(&format!(
            "INSERT INTO questions (title, description, question_type, options, required, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {QUESTION_COLUMNS}"
        ))
        .bind(dto.title.trim())
        .bind(&dto.description)
        .bind(dto.question_type)
        .bind(dto.options.unwrap_or_default())
        .bind(dto.required.unwrap_or(true))
        .bind(dto.sort_order.unwrap_or(0))
        .fetch_one(db)
        .await?;

        info!(question_id = %question.id, "Question created");
        Ok(question)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_question(
        db: &PgPool,
        id: Uuid,
        dto: UpdateQuestionDto,
    ) -> Result<Question, AppError> {
        let question = sqlx::query_as::<_, Question>(&format!(
            "UPDATE questions SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                question_type = COALESCE($4, question_type),
                options = COALESCE($5, options),
                required = COALESCE($6, required),
                sort_order = COALESCE($7, sort_order),
                is_active = COALESCE($8, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {QUESTION_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.title.as_deref().map(str::trim))
        .bind(&dto.description)
        .bind(dto.question_type)
        .bind(&dto.options)
        .bind(dto.required)
        .bind(dto.sort_order)
        .bind(dto.is_active)
        .fetch_optional(db)
        .await?
        .ok_or_else(question_not_found)?;

        Ok(question)
    }

    #[instrument(skip(db))]
    pub async fn delete_question(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(question_not_found());
        }
        info!(question_id = %id, "Question deleted");
        Ok(())
    }
}
