use std::sync::Arc;

use course_core::gate::ProgressSummary;
use course_core::model::{BONUS_LESSONS, Lesson, Product, UserId};
use storage::repository::{ProductRepository, ProgressRepository};

use crate::error::ProgressServiceError;

/// What the surprise page may show.
#[derive(Debug, Clone, PartialEq)]
pub enum SurpriseAccess {
    Unlocked {
        bonus_lessons: Vec<Lesson>,
        products: Vec<Product>,
    },
    Locked {
        percentage: u8,
    },
}

/// Evaluates the course gate against freshly read progress.
#[derive(Clone)]
pub struct ProgressService {
    progress: Arc<dyn ProgressRepository>,
    products: Arc<dyn ProductRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(progress: Arc<dyn ProgressRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { progress, products }
    }

    /// Gate snapshot for the dashboard. Always re-reads progress.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if progress cannot be read.
    pub async fn dashboard(&self, user_id: UserId) -> Result<ProgressSummary, ProgressServiceError> {
        let completed = self.progress.fetch_completed_slugs(user_id).await?;
        Ok(ProgressSummary::for_course(&completed))
    }

    /// Bonus lessons and partner products, if the course is fully completed.
    ///
    /// Products are only fetched once the gate is open.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if progress or products cannot be read.
    pub async fn surprise(&self, user_id: UserId) -> Result<SurpriseAccess, ProgressServiceError> {
        let summary = self.dashboard(user_id).await?;
        if !summary.bonus_unlocked {
            return Ok(SurpriseAccess::Locked {
                percentage: summary.percentage,
            });
        }

        let products = self.products.fetch_active_products(None).await?;
        Ok(SurpriseAccess::Unlocked {
            bonus_lessons: BONUS_LESSONS.to_vec(),
            products,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::model::{LESSONS, LessonSlug, ProductDraft, ProductId, ProgressRecord};
    use course_core::time::fixed_now;
    use storage::repository::InMemoryRepository;

    fn user() -> UserId {
        UserId::new(uuid::Uuid::from_u128(3))
    }

    async fn seeded(completed: usize) -> (InMemoryRepository, ProgressService) {
        let repo = InMemoryRepository::new();
        for lesson in LESSONS.iter().take(completed) {
            repo.mark_complete(&ProgressRecord::completed(
                user(),
                LessonSlug::parse(lesson.slug()).unwrap(),
                fixed_now(),
            ))
            .await
            .unwrap();
        }
        let product = ProductDraft {
            id: ProductId::random(),
            title: "Psyllium".into(),
            description: String::new(),
            category: "saciedade".into(),
            image_url: None,
            link: "https://loja.example.com/psyllium".into(),
            price: "R$ 49,90".into(),
            active: true,
        }
        .validate()
        .unwrap();
        repo.upsert_product(&product).unwrap();
        let service = ProgressService::new(Arc::new(repo.clone()), Arc::new(repo.clone()));
        (repo, service)
    }

    #[tokio::test]
    async fn dashboard_reflects_stored_progress() {
        let (_, service) = seeded(3).await;
        let summary = service.dashboard(user()).await.unwrap();
        assert_eq!(summary.completed, 3);
        assert_eq!(summary.percentage, 60);
        assert_eq!(summary.current, Some(3));
    }

    #[tokio::test]
    async fn surprise_is_locked_below_full_completion() {
        let (_, service) = seeded(4).await;
        assert_eq!(
            service.surprise(user()).await.unwrap(),
            SurpriseAccess::Locked { percentage: 80 }
        );
    }

    #[tokio::test]
    async fn surprise_lists_bonus_and_products_when_unlocked() {
        let (_, service) = seeded(5).await;
        match service.surprise(user()).await.unwrap() {
            SurpriseAccess::Unlocked {
                bonus_lessons,
                products,
            } => {
                assert_eq!(bonus_lessons.len(), 2);
                assert_eq!(products.len(), 1);
            }
            SurpriseAccess::Locked { .. } => panic!("expected unlocked"),
        }
    }

    #[tokio::test]
    async fn dashboard_sees_new_completions_without_caching() {
        let (repo, service) = seeded(0).await;
        assert_eq!(service.dashboard(user()).await.unwrap().percentage, 0);

        repo.mark_complete(&ProgressRecord::completed(
            user(),
            LessonSlug::parse("01-introducao").unwrap(),
            fixed_now(),
        ))
        .await
        .unwrap();
        assert_eq!(service.dashboard(user()).await.unwrap().percentage, 20);
    }
}
