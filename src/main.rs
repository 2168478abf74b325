use actix_cors::Cors;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::http::header;
use actix_web::{cookie::Key, middleware, web, App, HttpResponse, HttpServer};

use ppg_admin::auth::rate_limit::RateLimiter;
use ppg_admin::errors::ErrorBody;
use ppg_admin::{audit, auth, db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let database_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "data/ppg.db".to_string());
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let frontend_origin =
        std::env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let admin_password =
        std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

    // Ensure the data directory exists
    if let Some(parent) = std::path::Path::new(&database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).expect("Failed to create data directory");
        }
    }

    // Initialize database
    let pool = db::init_pool(&database_path);
    db::run_migrations(&pool);

    // Seed the bootstrap admin account if the database is empty
    let admin_hash = auth::password::hash_password(&admin_password)
        .expect("Failed to hash bootstrap admin password");
    db::seed_admin(&pool, &admin_hash);

    // Daily audit retention sweep; the first pass runs at startup
    audit::spawn_retention_sweep(pool.clone(), 365);

    // Session encryption key — load from SESSION_KEY env var for persistent sessions across restarts
    let secret_key = match std::env::var("SESSION_KEY") {
        Ok(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Ok(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need 64+) — generating random key",
                val.len()
            );
            Key::generate()
        }
        Err(_) => {
            log::warn!("No SESSION_KEY set — generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let limiter = web::Data::new(RateLimiter::new());

    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw =
            SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                .cookie_secure(false)
                .cookie_http_only(true)
                .build();

        let cors = Cors::default()
            .allowed_origin(&frontend_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(session_mw)
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(limiter.clone())
            .service(
                web::scope("/api")
                    .wrap(actix_web::middleware::from_fn(
                        auth::middleware::require_json_content_type,
                    ))
                    // Public: login only
                    .route("/auth/login", web::post().to(handlers::auth_handlers::login))
                    .service(
                        web::scope("")
                            .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                            .route("/auth/logout", web::post().to(handlers::auth_handlers::logout))
                            .route("/auth/me", web::get().to(handlers::auth_handlers::me))
                            // Participants
                            .route("/peserta", web::get().to(handlers::peserta_handlers::list))
                            .route("/peserta", web::post().to(handlers::peserta_handlers::create))
                            .route("/peserta/{id}", web::get().to(handlers::peserta_handlers::read))
                            .route("/peserta/{id}", web::put().to(handlers::peserta_handlers::update))
                            .route("/peserta/{id}", web::delete().to(handlers::peserta_handlers::deactivate))
                            // Sessions and rosters
                            .route("/sesi", web::get().to(handlers::sesi_handlers::list))
                            .route("/sesi", web::post().to(handlers::sesi_handlers::create))
                            .route("/sesi/{id}", web::get().to(handlers::sesi_handlers::read))
                            .route("/sesi/{id}", web::put().to(handlers::sesi_handlers::update))
                            .route("/sesi/{id}/status", web::put().to(handlers::sesi_handlers::update_status))
                            .route("/sesi/{id}/peserta", web::post().to(handlers::sesi_handlers::assign))
                            .route("/sesi/{id}/peserta/{peserta_id}", web::delete().to(handlers::sesi_handlers::unassign))
                            .route("/sesi/{id}/auto-assign", web::post().to(handlers::sesi_handlers::auto_assign))
                            .route("/sesi/{id}/roster", web::get().to(handlers::sesi_handlers::roster))
                            // Attendance
                            .route("/sesi/{id}/absensi", web::get().to(handlers::absensi_handlers::report))
                            .route("/sesi/{id}/absensi", web::post().to(handlers::absensi_handlers::check_in))
                            .route("/sesi/{id}/absensi/override", web::post().to(handlers::absensi_handlers::record_override))
                            .route("/sesi/{id}/absensi/bulk", web::post().to(handlers::absensi_handlers::bulk))
                            .route("/sesi/{id}/absensi/export", web::get().to(handlers::absensi_handlers::export_csv))
                            // Minutes
                            .route("/sesi/{id}/notulensi", web::post().to(handlers::notulensi_handlers::create))
                            .route("/notulensi", web::get().to(handlers::notulensi_handlers::list))
                            .route("/notulensi/{id}", web::get().to(handlers::notulensi_handlers::read))
                            .route("/notulensi/{id}", web::put().to(handlers::notulensi_handlers::update))
                            .route("/notulensi/{id}/status", web::put().to(handlers::notulensi_handlers::update_status))
                            // Annual work program
                            .route("/program-kerja/kegiatan", web::get().to(handlers::program_kerja_handlers::list_kegiatan))
                            .route("/program-kerja/kegiatan", web::post().to(handlers::program_kerja_handlers::create_kegiatan))
                            .route("/program-kerja/kegiatan/{id}", web::get().to(handlers::program_kerja_handlers::read_kegiatan))
                            .route("/program-kerja/kegiatan/{id}", web::put().to(handlers::program_kerja_handlers::update_kegiatan))
                            .route("/program-kerja/kegiatan/{id}", web::delete().to(handlers::program_kerja_handlers::delete_kegiatan))
                            .route("/program-kerja/kegiatan/{id}/rincian", web::post().to(handlers::program_kerja_handlers::create_rincian))
                            .route("/program-kerja/rincian/{id}", web::put().to(handlers::program_kerja_handlers::update_rincian))
                            .route("/program-kerja/rincian/{id}", web::delete().to(handlers::program_kerja_handlers::delete_rincian))
                            .route("/program-kerja/rekap", web::get().to(handlers::program_kerja_handlers::rekap))
                            // KBM reports; /kbm/rekap must precede /kbm/{id}
                            .route("/kbm/rekap", web::get().to(handlers::kbm_handlers::rekap))
                            .route("/kbm", web::get().to(handlers::kbm_handlers::list))
                            .route("/kbm", web::post().to(handlers::kbm_handlers::create))
                            .route("/kbm/{id}", web::put().to(handlers::kbm_handlers::update))
                            .route("/kbm/{id}", web::delete().to(handlers::kbm_handlers::delete))
                            // Document links
                            .route("/file-link", web::get().to(handlers::file_link_handlers::list))
                            .route("/file-link", web::post().to(handlers::file_link_handlers::create))
                            .route("/file-link/{id}", web::put().to(handlers::file_link_handlers::update))
                            .route("/file-link/{id}", web::delete().to(handlers::file_link_handlers::delete))
                            // Dashboard
                            .route("/dashboard", web::get().to(handlers::dashboard::summary)),
                    ),
            )
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                HttpResponse::NotFound().json(ErrorBody::new("Endpoint tidak ditemukan"))
            }))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
