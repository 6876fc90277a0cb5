//! Application context - dependency injection container

use std::sync::Arc;

use covera_core::{
    AdminRepository, AdminService, CommissionCalculator, CommissionLedger, EarningsService,
    LeadNotifier, LeadRepository, LeadService, PartnerRepository, PartnerService,
};
use covera_domain::{Config, Result};
use covera_infra::notifications::notifier_from_config;
use covera_infra::{
    DbManager, SqliteAdminRepository, SqliteCommissionLedger, SqliteLeadRepository,
    SqlitePartnerRepository,
};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub leads: LeadService,
    pub admins: AdminService,
    pub partners: PartnerService,
    pub earnings: EarningsService,
}

impl AppContext {
    /// Open the database, run migrations and wire every service.
    pub fn new(config: Config) -> Result<Self> {
        let notifier = notifier_from_config(&config.notifications)?;
        Self::with_notifier(config, notifier)
    }

    /// Same as [`new`](Self::new) with an explicit notifier.
    pub fn with_notifier(config: Config, notifier: Arc<dyn LeadNotifier>) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let leads: Arc<dyn LeadRepository> = Arc::new(SqliteLeadRepository::new(Arc::clone(&db)));
        let admins: Arc<dyn AdminRepository> =
            Arc::new(SqliteAdminRepository::new(Arc::clone(&db)));
        let partners: Arc<dyn PartnerRepository> =
            Arc::new(SqlitePartnerRepository::new(Arc::clone(&db)));
        let ledger: Arc<dyn CommissionLedger> =
            Arc::new(SqliteCommissionLedger::new(Arc::clone(&db)));

        let ctx = Self {
            leads: LeadService::new(
                Arc::clone(&leads),
                Arc::clone(&admins),
                Arc::clone(&partners),
                notifier,
            ),
            admins: AdminService::new(Arc::clone(&admins)),
            partners: PartnerService::new(partners, Arc::clone(&leads)),
            earnings: EarningsService::new(CommissionCalculator::default(), leads, admins, ledger)
                .with_currency_symbol(config.display.currency_symbol.clone()),
            config,
            db,
        };

        info!(db_path = %ctx.db.path().display(), "application context ready");
        Ok(ctx)
    }
}
