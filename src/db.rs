pub mod document_store;
pub use document_store::{Document, DocumentChange, DocumentStore, StoreError, StoredDocument};
pub mod memory_store;
pub use memory_store::MemoryDocumentStore;
pub mod pg_store;
pub use pg_store::PgDocumentStore;
pub mod repository;
pub use repository::{Entity, Repository};
#[cfg(test)]
pub(crate) mod testing;

use crate::models::{
    auth::{AppUser, Credential, Session},
    chargeback::Chargeback,
    checklist::ChecklistTemplate,
    counter::CounterBudget,
    driver::Driver,
    preset::{CodeCatalog, Preset},
    service_order::ServiceOrder,
    settings::{CounterGoal, VisitAnnouncement},
    technician::Technician,
};

pub type TechnicianRepository = Repository<Technician>;
pub type DriverRepository = Repository<Driver>;
pub type PresetRepository = Repository<Preset>;
pub type CodeCatalogRepository = Repository<CodeCatalog>;
pub type ChargebackRepository = Repository<Chargeback>;
pub type ChecklistRepository = Repository<ChecklistTemplate>;
pub type CounterBudgetRepository = Repository<CounterBudget>;
pub type ServiceOrderRepository = Repository<ServiceOrder>;
pub type UserRepository = Repository<AppUser>;
pub type CredentialRepository = Repository<Credential>;
pub type SessionRepository = Repository<Session>;
pub type CounterGoalRepository = Repository<CounterGoal>;
pub type VisitAnnouncementRepository = Repository<VisitAnnouncement>;
