use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::require_admin,
    errors::{AppError, AppResult},
    models::{
        domain::{
            score::average_score, Participation, Quiz, QuizTiming, Score, User, UserAnswer,
        },
        dto::{
            request::{
                CreateAnswersRequest, CreateParticipationRequest, CreateQuizRequest,
                CreateScoreRequest, UpdateQuizRequest,
            },
            response::QuizDto,
        },
    },
    repositories::{
        ParticipationRepository, QuizRepository, ScoreRepository, UserAnswerRepository,
    },
};

pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    scores: Arc<dyn ScoreRepository>,
    participation: Arc<dyn ParticipationRepository>,
    answers: Arc<dyn UserAnswerRepository>,
}

impl QuizService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        scores: Arc<dyn ScoreRepository>,
        participation: Arc<dyn ParticipationRepository>,
        answers: Arc<dyn UserAnswerRepository>,
    ) -> Self {
        Self {
            quizzes,
            scores,
            participation,
            answers,
        }
    }

    async fn find(&self, id: &str) -> AppResult<Quiz> {
        self.quizzes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    async fn find_active(&self, id: &str) -> AppResult<Quiz> {
        let quiz = self.find(id).await?;
        match quiz.timing() {
            QuizTiming::Active => Ok(quiz),
            QuizTiming::Past => Err(AppError::ValidationError(format!(
                "Quiz '{}' has already closed",
                quiz.name
            ))),
            QuizTiming::Upcoming => Err(AppError::ValidationError(format!(
                "Quiz '{}' has not opened yet",
                quiz.name
            ))),
        }
    }

    async fn to_dto(&self, quiz: Quiz) -> AppResult<QuizDto> {
        let scores = self
            .scores
            .find_by_quiz(&quiz.id)
            .await?
            .into_iter()
            .map(|s| s.score)
            .collect();
        let timing = quiz.timing();
        Ok(QuizDto::from_quiz(quiz, timing, scores))
    }

    /// Every quiz with its recorded scores. An empty store is reported as
    /// not found so clients can show their "no quizzes" state.
    pub async fn list_public(&self) -> AppResult<Vec<QuizDto>> {
        let quizzes = self.quizzes.find_all().await?;
        if quizzes.is_empty() {
            return Err(AppError::NotFound("No quizzes available".to_string()));
        }

        let mut listed = Vec::with_capacity(quizzes.len());
        for quiz in quizzes {
            listed.push(self.to_dto(quiz).await?);
        }
        Ok(listed)
    }

    pub async fn average_score(&self, quiz_id: &str) -> AppResult<Option<f64>> {
        self.find(quiz_id).await?;
        let scores = self.scores.find_by_quiz(quiz_id).await?;
        Ok(average_score(&scores))
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<QuizDto> {
        let quiz = self.find(id).await?;
        self.to_dto(quiz).await
    }

    pub async fn create_quiz(&self, actor: &User, request: CreateQuizRequest) -> AppResult<QuizDto> {
        require_admin(actor)?;
        request.validate()?;

        let quiz = Quiz::new(
            &request.name,
            request.quiz_type,
            request.difficulty,
            request.category,
            request.start_date,
            request.end_date,
            request.questions,
        );

        let created = self.quizzes.create(quiz).await?;
        log::info!("'{}' created quiz '{}'", actor.username, created.name);
        self.to_dto(created).await
    }

    pub async fn update_quiz(
        &self,
        actor: &User,
        id: &str,
        request: UpdateQuizRequest,
    ) -> AppResult<QuizDto> {
        require_admin(actor)?;
        request.validate()?;

        let mut quiz = self.find(id).await?;
        if let Some(name) = request.name {
            quiz.name = name;
        }
        if let Some(quiz_type) = request.quiz_type {
            quiz.quiz_type = quiz_type;
        }
        if let Some(difficulty) = request.difficulty {
            quiz.difficulty = difficulty;
        }
        if let Some(category) = request.category {
            quiz.category = Some(category);
        }
        if let Some(start_date) = request.start_date {
            quiz.start_date = start_date;
        }
        if let Some(end_date) = request.end_date {
            quiz.end_date = end_date;
        }
        if let Some(questions) = request.questions {
            quiz.questions = questions;
        }

        if quiz.end_date < quiz.start_date {
            return Err(AppError::ValidationError(
                "End date must not be before start date".to_string(),
            ));
        }

        let updated = self.quizzes.update(quiz).await?;
        self.to_dto(updated).await
    }

    /// Deletes a quiz together with its scores, participation and answers.
    pub async fn delete_quiz(&self, actor: &User, id: &str) -> AppResult<()> {
        require_admin(actor)?;

        self.quizzes.delete(id).await?;
        let scores = self.scores.delete_by_quiz(id).await?;
        let participation = self.participation.delete_by_quiz(id).await?;
        let answers = self.answers.delete_by_quiz(id).await?;

        log::info!(
            "'{}' deleted quiz {} ({} scores, {} participation, {} answers)",
            actor.username,
            id,
            scores,
            participation,
            answers
        );
        Ok(())
    }

    pub async fn record_score(&self, actor: &User, request: CreateScoreRequest) -> AppResult<Score> {
        request.validate()?;
        let quiz = self.find_active(&request.quiz_id).await?;

        let max_score = quiz.questions.len() as u32;
        if request.score > max_score {
            return Err(AppError::ValidationError(format!(
                "Score {} exceeds the {} questions in the quiz",
                request.score, max_score
            )));
        }

        self.scores
            .create(Score::new(&actor.id, &quiz.id, request.score))
            .await
    }

    pub async fn record_participation(
        &self,
        actor: &User,
        request: CreateParticipationRequest,
    ) -> AppResult<Participation> {
        request.validate()?;
        let quiz = self.find_active(&request.quiz_id).await?;

        self.participation
            .create(Participation::new(&actor.id, &quiz.id))
            .await
    }

    pub async fn create_answers(
        &self,
        actor: &User,
        request: CreateAnswersRequest,
    ) -> AppResult<Vec<UserAnswer>> {
        request.validate()?;
        let quiz = self.find(&request.quiz_id).await?;

        let answers = request
            .answers
            .iter()
            .map(|a| UserAnswer::new(&actor.id, &quiz.id, &a.question, &a.answer, a.is_correct))
            .collect();

        self.answers.create_many(answers).await
    }

    pub async fn user_answers(
        &self,
        actor: &User,
        quiz_id: Option<&str>,
    ) -> AppResult<Vec<UserAnswer>> {
        self.answers.find_by_user(&actor.id, quiz_id).await
    }
}
