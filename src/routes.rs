use crate::{
    api::{correction, report},
    config::Config,
};
use actix_governor::{
    governor::middleware::NoOpMiddleware, Governor, GovernorConfigBuilder, PeerIpKeyExtractor,
};
use actix_web::web;
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

    let report_limiter = Arc::new(build_limiter(config.rate_report_per_min));
    let update_limiter = Arc::new(build_limiter(config.rate_update_per_min));

    cfg.service(
        web::scope(&config.api_prefix).service(
            web::scope("/v1")
                .service(
                    web::resource("/report/daily")
                        .wrap(report_limiter.clone())
                        .route(web::get().to(report::daily_report)),
                )
                .service(
                    web::scope("/attendance")
                        // /attendance/status
                        .service(
                            web::resource("/status")
                                .wrap(update_limiter.clone())
                                .route(web::post().to(correction::update_status)),
                        )
                        // /attendance/overtime
                        .service(
                            web::resource("/overtime")
                                .wrap(update_limiter.clone())
                                .route(web::post().to(correction::override_overtime)),
                        ),
                ),
        ),
    );
}
