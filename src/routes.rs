use crate::{
    api::{advance, attendance, employee, overtime, payroll, wage_policy, wage_terms},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-scope limiter
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

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(build_limiter(config.rate_api_per_min)) // rate limiting
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(web::resource("/{id}").route(web::get().to(employee::get_employee)))
                    // /employees/{id}/wage-terms
                    .service(
                        web::resource("/{id}/wage-terms")
                            .route(web::put().to(wage_terms::put_wage_terms))
                            .route(web::get().to(wage_terms::get_wage_terms)),
                    ),
            )
            .service(
                web::scope("/wage-policy").service(
                    web::resource("")
                        .route(web::put().to(wage_policy::put_wage_policy))
                        .route(web::get().to(wage_policy::get_wage_policy)),
                ),
            )
            .service(
                web::scope("/attendance").service(
                    web::resource("/bulk").route(web::post().to(attendance::bulk_attendance)),
                ),
            )
            .service(
                web::scope("/overtime").service(
                    web::resource("/bulk").route(web::post().to(overtime::bulk_overtime)),
                ),
            )
            .service(
                web::scope("/advances")
                    .service(web::resource("").route(web::get().to(advance::list_advances)))
                    .service(
                        web::resource("/bulk").route(web::post().to(advance::bulk_advances)),
                    ),
            )
            .service(
                web::scope("/payroll")
                    // /payroll
                    .service(web::resource("").route(web::get().to(payroll::list_payroll)))
                    // /payroll/run
                    .service(web::resource("/run").route(web::post().to(payroll::run_payroll)))
                    // /payroll/{id}
                    .service(web::resource("/{id}").route(web::get().to(payroll::get_payroll)))
                    // /payroll/{id}/pay
                    .service(
                        web::resource("/{id}/pay").route(web::post().to(payroll::pay_payroll)),
                    ),
            ),
    );
}
