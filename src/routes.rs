use crate::{
    api::{calendar, holiday, leave_balance, leave_request, leave_type},
    auth::middleware::auth_middleware,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));
    let admin_limiter = Arc::new(build_limiter(config.rate_admin_per_min));

    // Everything is behind the token check; the service has no public
    // endpoints besides Swagger and the index.
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            // authentication
            .wrap(protected_limiter) // rate limiting
            .service(
                web::scope("/leave")
                    // /leave
                    .service(web::resource("").route(web::post().to(leave_request::apply_leave)))
                    // literal segments must be registered before /{id}
                    .service(web::resource("/my").route(web::get().to(leave_request::my_leaves)))
                    .service(
                        web::resource("/pending")
                            .route(web::get().to(leave_request::pending_leaves)),
                    )
                    // /leave/{id}
                    .service(web::resource("/{id}").route(web::get().to(leave_request::get_leave)))
                    // /leave/{id}/approve
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(leave_request::approve_leave)),
                    )
                    // /leave/{id}/reject
                    .service(
                        web::resource("/{id}/reject")
                            .route(web::put().to(leave_request::reject_leave)),
                    )
                    // /leave/{id}/cancel
                    .service(
                        web::resource("/{id}/cancel")
                            .route(web::put().to(leave_request::cancel_leave)),
                    ),
            )
            .service(
                web::scope("/balance")
                    .service(web::resource("").route(web::get().to(leave_balance::my_balances)))
                    .service(
                        web::resource("/{user_id}")
                            .route(web::get().to(leave_balance::user_balances)),
                    ),
            )
            .service(web::resource("/calendar").route(web::get().to(calendar::team_calendar)))
            .service(
                web::scope("/holiday")
                    .wrap(admin_limiter.clone())
                    .service(
                        web::resource("")
                            .route(web::post().to(holiday::create_holiday))
                            .route(web::get().to(holiday::list_holidays)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(holiday::update_holiday))
                            .route(web::delete().to(holiday::delete_holiday)),
                    ),
            )
            .service(
                web::scope("/leave-type")
                    .wrap(admin_limiter.clone())
                    .service(
                        web::resource("")
                            .route(web::post().to(leave_type::create_leave_type))
                            .route(web::get().to(leave_type::list_leave_types)),
                    ),
            ),
    );
}
