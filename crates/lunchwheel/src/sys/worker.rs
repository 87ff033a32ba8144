use crate::config::Config;
use crate::events::{AppEvent, SearchFailure, WorkerCommand};
use anyhow::Context;
use async_channel::{Receiver, Sender};
use placepick::places::PlacesClient;
use placepick::search::{Finder, SearchRequest};

pub fn build_finder(config: &Config) -> anyhow::Result<Finder> {
    let places = PlacesClient::new(config.places()).context("Failed to build places client")?;
    Ok(Finder::new(config.locator(), places))
}

/// Serves search commands one at a time, so at most one search is in flight.
pub async fn run_search_worker(
    config: Config,
    commands: Receiver<WorkerCommand>,
    tx: Sender<AppEvent>,
) {
    let mut finder = build_finder(&config);
    if let Err(e) = &finder {
        log::error!("{:#}", e);
    }

    while let Ok(command) = commands.recv().await {
        match command {
            WorkerCommand::Search(request) => {
                let event = search(&finder, &request).await;
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            WorkerCommand::Reconfigure(config) => {
                finder = build_finder(&config);
                match &finder {
                    Ok(_) => log::info!("Search settings updated"),
                    Err(e) => log::error!("{:#}", e),
                }
            }
        }
    }
}

async fn search(finder: &anyhow::Result<Finder>, request: &SearchRequest) -> AppEvent {
    let finder = match finder {
        Ok(f) => f,
        Err(e) => return AppEvent::SearchFailed(SearchFailure::service(format!("{e:#}"))),
    };

    match finder.find(request).await {
        Ok(outcome) => AppEvent::SearchFinished(outcome),
        Err(e) => {
            log::warn!("Search for \"{}\" failed: {}", request.keyword, e);
            AppEvent::SearchFailed(SearchFailure::from(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::FailureKind;
    use placepick::Coordinates;

    fn fixed_config() -> Config {
        Config {
            location: Some(Coordinates::new(10.0, 20.0)),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_search_without_api_key_reports_service_failure() {
        let finder = build_finder(&fixed_config());
        let event = search(&finder, &SearchRequest::new("tacos", 1500)).await;

        match event {
            AppEvent::SearchFailed(failure) => assert_eq!(failure.kind, FailureKind::Service),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_worker_answers_each_request_in_order() {
        let (cmd_tx, cmd_rx) = async_channel::unbounded();
        let (tx, rx) = async_channel::unbounded();
        let worker = tokio::spawn(run_search_worker(fixed_config(), cmd_rx, tx));

        for keyword in ["sushi", "pizza"] {
            cmd_tx
                .send(WorkerCommand::Search(SearchRequest::new(keyword, 800)))
                .await
                .unwrap();
        }
        cmd_tx
            .send(WorkerCommand::Reconfigure(Box::new(fixed_config())))
            .await
            .unwrap();
        drop(cmd_tx);

        let mut answers = 0;
        while let Ok(event) = rx.recv().await {
            assert!(matches!(event, AppEvent::SearchFailed(_)));
            answers += 1;
        }
        assert_eq!(answers, 2);
        worker.await.unwrap();
    }
}
