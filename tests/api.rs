mod helpers;

use helpers::setup::{at, raw_day, spawn_app, TestApp};
use power_schedule_api_structs::dtos::{QueueDTO, QueueScheduleDTO, RefreshOutcomeDTO, ScheduleChangeDTO};
use power_schedule_api_structs::{get_queues, refresh_queues, QueueResponse, SettingsResponse};
use power_schedule_domain::{DayLabel, RawScheduleBundle, RefreshPhase};
use serde_json::json;

async fn add_queue(app: &TestApp, name: &str, queue_id: &str) -> reqwest::Response {
    app.client
        .post(&app.url("/queues"))
        .json(&json!({ "name": name, "queueId": queue_id }))
        .send()
        .await
        .expect("Failed to execute request.")
}

async fn create_queue(app: &TestApp, name: &str, queue_id: &str) -> QueueDTO {
    let res = add_queue(app, name, queue_id).await;
    assert_eq!(res.status().as_u16(), 201);
    res.json::<QueueResponse>().await.unwrap().queue
}

async fn enable_notifications(app: &TestApp, queue: &QueueDTO) {
    let res = app
        .client
        .put(&app.url(&format!("/queues/{}", queue.id)))
        .json(&json!({ "notificationsEnabled": true }))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());
}

async fn get_schedule(app: &TestApp, queue: &QueueDTO, day: Option<&str>) -> reqwest::Response {
    let mut url = app.url(&format!("/queues/{}/schedule", queue.id));
    if let Some(day) = day {
        url = format!("{}?day={}", url, day);
    }
    app.client.get(&url).send().await.unwrap()
}

async fn refresh(app: &TestApp, queue: &QueueDTO) -> RefreshOutcomeDTO {
    app.client
        .post(&app.url(&format!("/queues/{}/refresh", queue.id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let app = spawn_app(at("10.12.2025", 9, 0)).await;
    let res = app.client.get(&app.url("/status")).send().await.unwrap();
    assert!(res.status().is_success());
}

#[actix_web::main]
#[test]
async fn test_add_queue_validates_queue_id() {
    let app = spawn_app(at("10.12.2025", 9, 0)).await;

    let res = add_queue(&app, "Дім", "55").await;
    assert_eq!(res.status().as_u16(), 400);
    let res = add_queue(&app, "", "5.2").await;
    assert_eq!(res.status().as_u16(), 400);

    let queue = create_queue(&app, "Дім", "5.2").await;
    assert_eq!(queue.queue_id, "5.2");
    let res = add_queue(&app, "Дім", "1.1").await;
    assert_eq!(res.status().as_u16(), 409);

    let queues = app
        .client
        .get(&app.url("/queues"))
        .send()
        .await
        .unwrap()
        .json::<get_queues::APIResponse>()
        .await
        .unwrap()
        .queues;
    assert_eq!(queues, vec![queue]);
}

#[actix_web::main]
#[test]
async fn test_today_schedule_with_reminder() {
    let app = spawn_app(at("10.12.2025", 9, 0)).await;
    app.fetcher.set_bundle(RawScheduleBundle::new(vec![raw_day(
        "10.12.2025",
        "5.2",
        &[("10:00", "12:00")],
    )]));
    let queue = create_queue(&app, "Дім", "5.2").await;
    enable_notifications(&app, &queue).await;

    let res = get_schedule(&app, &queue, None).await;
    assert!(res.status().is_success());
    let dto = res.json::<QueueScheduleDTO>().await.unwrap();
    assert_eq!(dto.state, RefreshPhase::Resolved);
    assert_eq!(dto.updated_at.as_deref(), Some("09:00"));
    assert_eq!(dto.status.status_text, "Відключення о 10:00");

    let view = dto.schedule.unwrap();
    assert_eq!(view.day, DayLabel::Today);
    assert_eq!(view.current_outage, None);
    let next = view.next_outage.unwrap();
    assert_eq!(next.from.to_string(), "10:00");
    assert_eq!(next.to.to_string(), "12:00");

    let pending = app.alerts.pending();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].fire_at, at("10.12.2025", 9, 30));
    assert_eq!(pending[0].key, "shutdown_10:00_Дім");

    app.sys.set(at("10.12.2025", 10, 30));
    let dto = get_schedule(&app, &queue, None)
        .await
        .json::<QueueScheduleDTO>()
        .await
        .unwrap();
    assert!(!dto.status.is_power_on);
    assert_eq!(dto.status.status_text, "Увімкнуть о 12:00");
}

#[actix_web::main]
#[test]
async fn test_refresh_detects_changes() {
    let app = spawn_app(at("10.12.2025", 9, 0)).await;
    app.fetcher.set_bundle(RawScheduleBundle::new(vec![raw_day(
        "10.12.2025",
        "5.2",
        &[("10:00", "12:00")],
    )]));
    let queue = create_queue(&app, "Дім", "5.2").await;

    assert_eq!(refresh(&app, &queue).await.change, Some(ScheduleChangeDTO::FirstSeen));
    assert_eq!(refresh(&app, &queue).await.change, Some(ScheduleChangeDTO::Unchanged));
    assert!(app.alerts.delivered().is_empty());

    app.fetcher.set_bundle(RawScheduleBundle::new(vec![raw_day(
        "10.12.2025",
        "5.2",
        &[("10:00", "14:00")],
    )]));
    assert_eq!(refresh(&app, &queue).await.change, Some(ScheduleChangeDTO::Changed));
    assert_eq!(app.alerts.delivered().len(), 1);
}

#[actix_web::main]
#[test]
async fn test_paging_between_days() {
    let app = spawn_app(at("10.12.2025", 23, 30)).await;
    app.fetcher.set_bundle(RawScheduleBundle::new(vec![
        raw_day("10.12.2025", "5.2", &[("20:00", "23:00")]),
        raw_day("11.12.2025", "5.2", &[("08:00", "10:00")]),
    ]));
    let queue = create_queue(&app, "Дім", "5.2").await;

    let view = get_schedule(&app, &queue, None)
        .await
        .json::<QueueScheduleDTO>()
        .await
        .unwrap()
        .schedule
        .unwrap();
    assert_eq!(view.day, DayLabel::Tomorrow);

    let view = get_schedule(&app, &queue, Some("today"))
        .await
        .json::<QueueScheduleDTO>()
        .await
        .unwrap()
        .schedule
        .unwrap();
    assert_eq!(view.day, DayLabel::Today);
    assert!(view.timeline[19] && !view.timeline[20] && !view.timeline[22] && view.timeline[23]);

    let res = get_schedule(&app, &queue, Some("yesterday")).await;
    assert_eq!(res.status().as_u16(), 404);
}

#[actix_web::main]
#[test]
async fn test_failed_fetch_shows_no_data() {
    let app = spawn_app(at("10.12.2025", 9, 0)).await;
    let queue = create_queue(&app, "Дім", "5.2").await;

    let outcome = refresh(&app, &queue).await;
    assert_eq!(outcome.state, RefreshPhase::Failed);
    assert!(outcome.error.is_some());

    let dto = get_schedule(&app, &queue, None)
        .await
        .json::<QueueScheduleDTO>()
        .await
        .unwrap();
    assert_eq!(dto.state, RefreshPhase::Failed);
    assert!(dto.schedule.is_none());
    assert_eq!(dto.status.status_text, "Даних немає");
}

#[actix_web::main]
#[test]
async fn test_refresh_all_queues() {
    let app = spawn_app(at("10.12.2025", 9, 0)).await;
    app.fetcher.set_bundle(RawScheduleBundle::new(vec![raw_day(
        "10.12.2025",
        "5.2",
        &[("10:00", "12:00")],
    )]));
    create_queue(&app, "Дім", "5.2").await;
    create_queue(&app, "Офіс", "1.1").await;

    let res = app
        .client
        .post(&app.url("/queues/refresh"))
        .send()
        .await
        .unwrap()
        .json::<refresh_queues::APIResponse>()
        .await
        .unwrap();
    assert_eq!(res.results.len(), 2);
    assert_eq!(
        res.results
            .iter()
            .filter(|r| r.state == RefreshPhase::Resolved)
            .count(),
        1
    );
}

#[actix_web::main]
#[test]
async fn test_delete_queue() {
    let app = spawn_app(at("10.12.2025", 9, 0)).await;
    app.fetcher.set_bundle(RawScheduleBundle::new(vec![raw_day(
        "10.12.2025",
        "5.2",
        &[("10:00", "12:00")],
    )]));
    let queue = create_queue(&app, "Дім", "5.2").await;
    enable_notifications(&app, &queue).await;
    refresh(&app, &queue).await;
    assert_eq!(app.alerts.pending().len(), 1);

    let url = app.url(&format!("/queues/{}", queue.id));
    let res = app.client.delete(&url).send().await.unwrap();
    assert!(res.status().is_success());
    assert!(app.alerts.pending().is_empty());

    let res = app.client.delete(&url).send().await.unwrap();
    assert_eq!(res.status().as_u16(), 404);
    let res = get_schedule(&app, &queue, None).await;
    assert_eq!(res.status().as_u16(), 404);
}

#[actix_web::main]
#[test]
async fn test_settings() {
    let app = spawn_app(at("10.12.2025", 9, 0)).await;

    let settings = app
        .client
        .get(&app.url("/settings"))
        .send()
        .await
        .unwrap()
        .json::<SettingsResponse>()
        .await
        .unwrap()
        .settings;
    assert_eq!(settings.update_interval_minutes, 15);
    assert_eq!(settings.notification_minutes_before, 30);
    assert_eq!(settings.update_interval_choices, vec![5, 10, 15, 30, 60]);

    let res = app
        .client
        .put(&app.url("/settings"))
        .json(&json!({ "notificationMinutesBefore": 60 }))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());
    let settings = res.json::<SettingsResponse>().await.unwrap().settings;
    assert_eq!(settings.notification_minutes_before, 60);

    let res = app
        .client
        .put(&app.url("/settings"))
        .json(&json!({ "updateIntervalMinutes": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 400);
}
