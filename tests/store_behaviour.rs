//! Behaviour of the podcast aggregate over the in-memory store.

use podcast_rs::config::JwtConfig;
use podcast_rs::error::AppError;
use podcast_rs::models::{Actor, EpisodeChanges, PodcastChanges, Role};
use podcast_rs::repositories::Repositories;
use podcast_rs::services::Services;
use proptest::prelude::*;

const HOST: i32 = 1;
const OTHER_HOST: i32 = 2;

fn services() -> Services {
    Services::new(
        Repositories::in_memory(),
        JwtConfig {
            secret: "store-behaviour-secret-0123456789abcdef".to_string(),
            access_token_expiration: 1,
        },
    )
}

fn host() -> Option<Actor> {
    Some(Actor::new(HOST, Role::Host))
}

fn other_host() -> Option<Actor> {
    Some(Actor::new(OTHER_HOST, Role::Host))
}

async fn podcast_with_episodes(services: &Services, episodes: usize) -> (i32, Vec<i32>) {
    let id = services
        .podcasts
        .create_podcast("T".to_string(), "C".to_string(), Some(HOST))
        .await
        .unwrap();

    let mut episode_ids = Vec::new();
    for n in 0..episodes {
        let episode_id = services
            .podcasts
            .create_episode(id, format!("E{}", n), "C2".to_string(), host())
            .await
            .unwrap();
        episode_ids.push(episode_id);
    }
    (id, episode_ids)
}

#[tokio::test]
async fn missing_podcast_short_circuits_every_operation() {
    let services = services();
    let (existing, _) = podcast_with_episodes(&services, 1).await;
    let before = services.podcasts.list_podcasts().await.unwrap();

    let missing = existing + 100;
    let expected = format!("Podcast with id {} not found", missing);
    let podcasts = &services.podcasts;

    let errors = vec![
        podcasts.get_podcast(missing).await.unwrap_err(),
        podcasts.delete_podcast(missing, None).await.unwrap_err(),
        podcasts
            .update_podcast(
                missing,
                PodcastChanges {
                    rating: Some(9),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap_err(),
        podcasts.get_episodes(missing).await.unwrap_err(),
        podcasts.get_episode(missing, 1).await.unwrap_err(),
        podcasts
            .create_episode(missing, "E".to_string(), "C".to_string(), None)
            .await
            .unwrap_err(),
        podcasts
            .update_episode(missing, 1, EpisodeChanges::default(), None)
            .await
            .unwrap_err(),
        podcasts.delete_episode(missing, 1, None).await.unwrap_err(),
        podcasts
            .create_review(HOST, missing, "R".to_string(), "Text".to_string())
            .await
            .unwrap_err(),
    ];

    for error in errors {
        assert!(matches!(error, AppError::PodcastNotFound { id } if id == missing));
        assert_eq!(error.public_message(), expected);
    }

    assert_eq!(services.podcasts.list_podcasts().await.unwrap(), before);
}

#[tokio::test]
async fn missing_episode_reports_episode_not_found() {
    let services = services();
    let (id, _) = podcast_with_episodes(&services, 1).await;
    let before = services.podcasts.get_podcast(id).await.unwrap();

    let errors = vec![
        services.podcasts.get_episode(id, 999).await.unwrap_err(),
        services
            .podcasts
            .update_episode(
                id,
                999,
                EpisodeChanges {
                    title: Some("X".to_string()),
                    ..Default::default()
                },
                host(),
            )
            .await
            .unwrap_err(),
        services
            .podcasts
            .delete_episode(id, 999, host())
            .await
            .unwrap_err(),
    ];

    for error in errors {
        assert_eq!(
            error.public_message(),
            format!("Episode with id 999 not found in podcast with id {}", id)
        );
    }
    assert_eq!(services.podcasts.get_podcast(id).await.unwrap(), before);
}

#[tokio::test]
async fn invalid_rating_leaves_podcast_untouched() {
    let services = services();
    let (id, _) = podcast_with_episodes(&services, 0).await;

    for rating in [0, 6] {
        let err = services
            .podcasts
            .update_podcast(
                id,
                PodcastChanges {
                    title: Some("Renamed".to_string()),
                    rating: Some(rating),
                    ..Default::default()
                },
                host(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRating));
        assert_eq!(err.public_message(), "Rating must be between 1 and 5.");

        let stored = services.podcasts.get_podcast(id).await.unwrap();
        assert_eq!(stored.rating, 0);
        assert_eq!(stored.title, "T");
    }

    services
        .podcasts
        .update_podcast(
            id,
            PodcastChanges {
                rating: Some(3),
                ..Default::default()
            },
            host(),
        )
        .await
        .unwrap();
    assert_eq!(services.podcasts.get_podcast(id).await.unwrap().rating, 3);
}

#[tokio::test]
async fn partial_update_only_changes_given_fields() {
    let services = services();
    let (id, _) = podcast_with_episodes(&services, 2).await;
    let before = services.podcasts.get_podcast(id).await.unwrap();

    services
        .podcasts
        .update_podcast(
            id,
            PodcastChanges {
                title: Some("X".to_string()),
                ..Default::default()
            },
            host(),
        )
        .await
        .unwrap();

    let after = services.podcasts.get_podcast(id).await.unwrap();
    assert_eq!(after.title, "X");
    assert_eq!(after.category, before.category);
    assert_eq!(after.rating, before.rating);
    assert_eq!(after.episodes, before.episodes);
}

#[tokio::test]
async fn deleting_a_podcast_cascades_to_its_episodes() {
    let services = services();
    let (id, episodes) = podcast_with_episodes(&services, 2).await;

    services.podcasts.delete_podcast(id, host()).await.unwrap();

    let expected = format!("Podcast with id {} not found", id);
    assert_eq!(
        services.podcasts.get_episodes(id).await.unwrap_err().public_message(),
        expected
    );
    for episode_id in episodes {
        let err = services.podcasts.get_episode(id, episode_id).await.unwrap_err();
        assert!(matches!(err, AppError::PodcastNotFound { .. }));
        assert!(matches!(
            services.podcasts.find_episode(episode_id).await,
            Err(AppError::UnknownEpisode { .. })
        ));
    }
}

#[tokio::test]
async fn episodes_are_scoped_to_their_podcast() {
    let services = services();
    let (a, a_episodes) = podcast_with_episodes(&services, 1).await;
    let (b, b_episodes) = podcast_with_episodes(&services, 1).await;

    let err = services
        .podcasts
        .get_episode(a, b_episodes[0])
        .await
        .unwrap_err();
    assert_eq!(
        err.public_message(),
        format!(
            "Episode with id {} not found in podcast with id {}",
            b_episodes[0], a
        )
    );

    let episode = services.podcasts.get_episode(b, b_episodes[0]).await.unwrap();
    assert_eq!(episode.podcast_id, b);
    assert_ne!(a_episodes[0], b_episodes[0]);
}

#[tokio::test]
async fn ownership_is_checked_after_resolution() {
    let services = services();
    let (id, episodes) = podcast_with_episodes(&services, 1).await;
    let before = services.podcasts.get_podcast(id).await.unwrap();

    let podcasts = &services.podcasts;
    let errors = vec![
        podcasts.delete_podcast(id, other_host()).await.unwrap_err(),
        podcasts
            .update_podcast(
                id,
                PodcastChanges {
                    rating: Some(9),
                    ..Default::default()
                },
                other_host(),
            )
            .await
            .unwrap_err(),
        podcasts
            .create_episode(id, "E".to_string(), "C".to_string(), other_host())
            .await
            .unwrap_err(),
        podcasts
            .update_episode(id, episodes[0], EpisodeChanges::default(), other_host())
            .await
            .unwrap_err(),
        podcasts
            .delete_episode(id, episodes[0], other_host())
            .await
            .unwrap_err(),
    ];
    for error in errors {
        assert!(matches!(error, AppError::NotAuthorized));
        assert_eq!(error.public_message(), "Not authorized");
    }
    assert_eq!(services.podcasts.get_podcast(id).await.unwrap(), before);

    // a missing target is reported before ownership
    let err = services
        .podcasts
        .delete_episode(id, 999, other_host())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EpisodeNotFound { .. }));
}

#[tokio::test]
async fn listing_is_stable_without_writes() {
    let services = services();
    podcast_with_episodes(&services, 2).await;
    podcast_with_episodes(&services, 0).await;

    let first = services.podcasts.list_podcasts().await.unwrap();
    let second = services.podcasts.list_podcasts().await.unwrap();
    assert_eq!(first, second);
    assert!(first.windows(2).all(|pair| pair[0].id < pair[1].id));
}

#[tokio::test]
async fn create_get_delete_scenario() {
    let services = services();

    let n = services
        .podcasts
        .create_podcast("T".to_string(), "C".to_string(), None)
        .await
        .unwrap();
    let podcast = services.podcasts.get_podcast(n).await.unwrap();
    assert_eq!(podcast.id, n);
    assert_eq!(podcast.title, "T");
    assert_eq!(podcast.category, "C");
    assert_eq!(podcast.rating, 0);
    assert!(podcast.episodes.is_empty());

    let m = services
        .podcasts
        .create_episode(n, "E".to_string(), "C2".to_string(), None)
        .await
        .unwrap();
    services.podcasts.delete_podcast(n, None).await.unwrap();

    let err = services.podcasts.get_episode(n, m).await.unwrap_err();
    assert_eq!(err.public_message(), format!("Podcast with id {} not found", n));
}

#[tokio::test]
async fn listener_links_follow_the_catalog() {
    let services = services();
    let listener = services
        .accounts
        .create_account("listener@example.com".to_string(), "pw-123456", Role::Listener)
        .await
        .unwrap();
    let (id, episodes) = podcast_with_episodes(&services, 1).await;

    assert!(services.accounts.toggle_subscribe(listener.id, id).await.unwrap());
    services
        .accounts
        .mark_episode_played(listener.id, episodes[0])
        .await
        .unwrap();

    let profile = services.accounts.get_profile(listener.id).await.unwrap();
    assert_eq!(profile.subscriptions, vec![id]);
    assert_eq!(profile.played_episodes, episodes);

    services.podcasts.delete_podcast(id, host()).await.unwrap();
    assert!(services.accounts.subscriptions(listener.id).await.unwrap().is_empty());

    let err = services
        .accounts
        .toggle_subscribe(listener.id, id)
        .await
        .unwrap_err();
    assert_eq!(err.public_message(), format!("Podcast with id {} not found", id));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_never_interleave_fields() {
    let services = services();
    let (id, _) = podcast_with_episodes(&services, 0).await;

    let mut handles = Vec::new();
    for n in 0..200 {
        let services = services.clone();
        handles.push(tokio::spawn(async move {
            let version = format!("v{}", n);
            services
                .podcasts
                .update_podcast(
                    id,
                    PodcastChanges {
                        title: Some(version.clone()),
                        category: Some(version),
                        ..Default::default()
                    },
                    host(),
                )
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let podcast = services.podcasts.get_podcast(id).await.unwrap();
    assert_eq!(podcast.title, podcast.category);
    assert!(podcast.title.starts_with('v'));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn rating_update_accepts_exactly_one_to_five(rating in -10i32..15) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let services = services();
            let (id, _) = podcast_with_episodes(&services, 0).await;

            let result = services
                .podcasts
                .update_podcast(
                    id,
                    PodcastChanges { rating: Some(rating), ..Default::default() },
                    host(),
                )
                .await;
            let stored = services.podcasts.get_podcast(id).await.unwrap().rating;

            if (1..=5).contains(&rating) {
                assert!(result.is_ok());
                assert_eq!(stored, rating);
            } else {
                assert!(matches!(result, Err(AppError::InvalidRating)));
                assert_eq!(stored, 0);
            }
        });
    }
}
