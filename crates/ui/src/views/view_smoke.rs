use std::collections::HashSet;
use std::sync::Arc;

use course_core::model::{
    LESSONS, LessonSlug, Product, ProductDraft, ProductId, ProgressRecord, UserId,
};
use course_core::time::fixed_now;
use storage::repository::{InMemoryRepository, ProgressRepository, Storage, StorageError};

use super::test_harness::{
    ViewKind, setup_view_harness, setup_view_harness_with_repo, setup_view_harness_with_storage,
    test_user,
};

async fn complete_first(repo: &InMemoryRepository, n: usize) {
    for lesson in LESSONS.iter().take(n) {
        let slug = LessonSlug::parse(lesson.slug()).unwrap();
        repo.mark_complete(&ProgressRecord::completed(test_user(), slug, fixed_now()))
            .await
            .expect("seed progress");
    }
}

fn product(title: &str, category: &str) -> Product {
    ProductDraft {
        id: ProductId::random(),
        title: title.into(),
        description: format!("{title} descrição"),
        category: category.into(),
        image_url: None,
        link: "https://loja.example.com/item".into(),
        price: "R$ 49,90".into(),
        active: true,
    }
    .validate()
    .unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_fresh_progress() {
    let mut harness = setup_view_harness(ViewKind::Dashboard);
    harness.settle().await;
    let html = harness.render();

    for expected in ["Bio-Dados", "0%", "0/5", "Iniciado", "Bloqueado", "Requer 100%"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(html.contains("01. Introdução ao Método M"), "missing first lesson in {html}");
    assert!(html.contains("Recomendado"), "missing badge in {html}");
    assert!(!html.contains("ACESSO LIBERADO"), "unexpected unlock in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_unlocked_state() {
    let repo = InMemoryRepository::new();
    complete_first(&repo, 5).await;
    let mut harness = setup_view_harness_with_repo(ViewKind::Dashboard, repo);
    harness.settle().await;
    let html = harness.render();

    for expected in ["100%", "5/5", "Elite", "ACESSO LIBERADO", "Acessar Surpresa"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(!html.contains("Recomendado"), "no lesson should be current in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_offers_resume_after_a_visit() {
    let mut harness = setup_view_harness(ViewKind::Dashboard);
    harness
        .services
        .lessons()
        .load_lesson(harness.user_id, "01-introducao")
        .await
        .expect("load lesson");
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Continuar: 01. Introdução ao Método M"), "missing resume in {html}");
    assert!(html.contains("1 dia(s) seguidos"), "missing streak in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_smoke_renders_first_card() {
    let mut harness = setup_view_harness(ViewKind::Lesson("01-introducao"));
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Bem-vindo ao Método M"), "missing heading in {html}");
    assert!(html.contains("Card 1 de"), "missing counter in {html}");
    assert!(html.contains("Anterior"), "missing prev button in {html}");
    assert!(html.contains("Próximo"), "missing next button in {html}");
    assert!(
        !html.contains("Marcar como Concluída"),
        "completion button belongs on the last card: {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_smoke_renders_locked_state() {
    let mut harness = setup_view_harness(ViewKind::Lesson("03-rotina-minima"));
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Aula bloqueada"), "missing lock title in {html}");
    assert!(html.contains("Voltar ao Dashboard"), "missing back link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_smoke_renders_not_found_state() {
    let mut harness = setup_view_harness(ViewKind::Lesson("nao-existe"));
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Aula não encontrada"), "missing not found in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn bonus_lesson_is_locked_until_course_is_complete() {
    let repo = InMemoryRepository::new();
    complete_first(&repo, 4).await;
    let mut harness = setup_view_harness_with_repo(ViewKind::Lesson("rotina-7-dias"), repo);
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("80%"), "missing progress in {html}");
    assert!(html.contains("Aula bloqueada"), "missing lock in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn surprise_smoke_lists_bonus_and_products_when_unlocked() {
    let repo = InMemoryRepository::new();
    complete_first(&repo, 5).await;
    repo.upsert_product(&product("Whey Isolado", "saciedade")).unwrap();
    let mut harness = setup_view_harness_with_repo(ViewKind::Surprise, repo);
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Rotina de 7 Dias"), "missing bonus in {html}");
    assert!(html.contains("Lista de Compras Secreta"), "missing bonus in {html}");
    assert!(html.contains("Whey Isolado"), "missing product in {html}");
    assert!(html.contains("Ver Oferta"), "missing offer link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn surprise_smoke_hides_content_when_locked() {
    let repo = InMemoryRepository::new();
    complete_first(&repo, 3).await;
    let mut harness = setup_view_harness_with_repo(ViewKind::Surprise, repo);
    harness.settle().await;
    let html = harness.render();

    assert!(!html.contains("Rotina de 7 Dias"), "bonus leaked in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn arsenal_smoke_lists_default_category() {
    let repo = InMemoryRepository::new();
    repo.upsert_product(&product("Psyllium", "saciedade")).unwrap();
    repo.upsert_product(&product("Magnésio", "sono")).unwrap();
    let mut harness = setup_view_harness_with_repo(ViewKind::Arsenal, repo);
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Psyllium"), "missing product in {html}");
    assert!(!html.contains("Magnésio"), "other category leaked in {html}");
    assert!(html.contains("tab tab--active"), "missing active tab in {html}");
    assert!(html.contains("R$ 49,90"), "missing price in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn arsenal_smoke_renders_empty_category() {
    let repo = InMemoryRepository::new();
    repo.upsert_product(&product("Magnésio", "sono")).unwrap();
    let mut harness = setup_view_harness_with_repo(ViewKind::Arsenal, repo);
    harness.settle().await;
    let html = harness.render();

    assert!(
        html.contains("Nenhum item nesta categoria ainda."),
        "missing empty state in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn not_found_smoke_links_home() {
    let mut harness = setup_view_harness(ViewKind::NotFound);
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("404"), "missing code in {html}");
    assert!(html.contains("Página não encontrada"), "missing text in {html}");
    assert!(html.contains("Voltar ao início"), "missing link in {html}");
}

struct FailingProgressRepo;

#[async_trait::async_trait]
impl ProgressRepository for FailingProgressRepo {
    async fn fetch_completed_slugs(
        &self,
        _user_id: UserId,
    ) -> Result<HashSet<LessonSlug>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn is_completed(&self, _user_id: UserId, _slug: &LessonSlug) -> Result<bool, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn mark_complete(&self, _record: &ProgressRecord) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

fn failing_storage() -> Storage {
    let mut storage = Storage::in_memory();
    storage.progress = Arc::new(FailingProgressRepo);
    storage
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_error_state() {
    let mut harness = setup_view_harness_with_storage(ViewKind::Dashboard, &failing_storage());
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Algo deu errado"), "missing error in {html}");
    assert!(html.contains("Tentar novamente"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_smoke_renders_storage_error() {
    let mut harness =
        setup_view_harness_with_storage(ViewKind::Lesson("01-introducao"), &failing_storage());
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Erro ao carregar"), "missing error in {html}");
}
