use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::path::Path;

use luckydraw_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::create_cors,
    services::*,
    storage::{
        FallbackStore, LocalContests, LocalParticipants, LocalPrizes, RemoteContests,
        RemoteParticipants, RemotePrizes, StorageMonitor,
    },
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移（远端不可用时只告警，本地兜底仍可服务）
    if let Err(e) = run_migrations(&pool).await {
        log::warn!("Failed to run database migrations, continuing with local fallback: {e}");
    }

    // 远端优先、本地 JSON 兜底的三个集合存储
    let local_dir = Path::new(&config.storage.local_dir);
    let contest_store = FallbackStore::new(
        RemoteContests::new(pool.clone()),
        LocalContests::new(local_dir),
        "contests",
    );
    let prize_store = FallbackStore::new(
        RemotePrizes::new(pool.clone()),
        LocalPrizes::new(local_dir),
        "prizes",
    );
    let participant_store = FallbackStore::new(
        RemoteParticipants::new(pool.clone()),
        LocalParticipants::new(local_dir),
        "participants",
    );

    let monitor = StorageMonitor::new(
        pool.clone(),
        contest_store.clone(),
        prize_store.clone(),
        participant_store.clone(),
    );
    monitor.log_report().await;

    // 创建服务
    let activity_log_service = ActivityLogService::new(pool.clone());
    let contest_service = ContestService::new(contest_store.clone(), activity_log_service.clone());
    let prize_service = PrizeService::new(prize_store, pool.clone());
    let participant_service = ParticipantService::new(participant_store, contest_store);
    let draw_service = DrawService::new(pool.clone(), activity_log_service.clone());
    let admin_service = AdminService::new(pool.clone(), activity_log_service.clone());

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(contest_service.clone()))
            .app_data(web::Data::new(prize_service.clone()))
            .app_data(web::Data::new(participant_service.clone()))
            .app_data(web::Data::new(draw_service.clone()))
            .app_data(web::Data::new(admin_service.clone()))
            .app_data(web::Data::new(activity_log_service.clone()))
            .app_data(web::Data::new(monitor.clone()))
            .configure(swagger_config)
            .service(
                // 活动维度的子路由在 /contests 作用域之前注册
                web::scope("/api/v1")
                    .configure(handlers::prize_config)
                    .configure(handlers::participant_config)
                    .configure(handlers::draw_config)
                    .configure(handlers::contest_config)
                    .configure(handlers::admin_config)
                    .configure(handlers::activity_log_config)
                    .configure(handlers::storage_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
