use crate::shared::usecase::UseCase;
use power_schedule_infra::{DeliveredAlert, PowerScheduleContext};
use tracing::info;

/// Hands every pending reminder that is due to the user
#[derive(Debug)]
pub struct DeliverDueRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for DeliverDueRemindersUseCase {
    type Response = Vec<DeliveredAlert>;

    type Error = UseCaseError;

    const NAME: &'static str = "DeliverDueReminders";

    async fn execute(&mut self, ctx: &PowerScheduleContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_local_datetime();
        let delivered = ctx.services.alerts.deliver_due(now).await;
        if !delivered.is_empty() {
            info!("Delivered {} reminder(s) at {}", delivered.len(), now);
        }
        Ok(delivered)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_utils::{at, setup_context};
    use power_schedule_domain::{AlertContent, ReminderJob, ID};

    #[actix_web::main]
    #[test]
    async fn it_delivers_due_reminders() {
        let test = setup_context(at("10.12.2025", 9, 0));
        let job = ReminderJob {
            key: "shutdown_10:00_Дім".into(),
            fire_at: at("10.12.2025", 9, 30),
            queue_id: ID::new(),
            interval_label: "10:00-12:00".into(),
            content: AlertContent {
                title: "⚡ Скоро відключення!".into(),
                body: "Дім: відключення о 10:00 (через 30 хв)".into(),
            },
        };
        test.ctx.services.alerts.schedule_local_alert(&job).await.unwrap();

        let mut usecase = DeliverDueRemindersUseCase {};
        assert!(usecase.execute(&test.ctx).await.unwrap().is_empty());

        test.sys.set(at("10.12.2025", 9, 30));
        let delivered = usecase.execute(&test.ctx).await.unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].content, job.content);
        assert!(test.alerts.pending().is_empty());
    }
}
