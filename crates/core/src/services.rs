//! Service wiring for one signed-in session.

use std::sync::Arc;

use crate::calendar::CalendarService;
use crate::contacts::ContactService;
use crate::contracts::{ContractService, ContractServiceTrait};
use crate::deals::DealPipelineService;
use crate::payments::PaymentService;
use crate::players::{PlayerService, PlayerServiceTrait};
use crate::reminders::ReminderService;
use crate::repositories::Repositories;
use crate::utils::Clock;

pub struct AgencyServices {
    pub repositories: Repositories,
    pub players: Arc<dyn PlayerServiceTrait>,
    pub contracts: Arc<dyn ContractServiceTrait>,
    pub pipeline: DealPipelineService,
    pub payments: PaymentService,
    pub reminders: ReminderService,
    pub contacts: ContactService,
    pub calendar: CalendarService,
}

impl AgencyServices {
    pub fn new(repositories: Repositories, clock: Clock) -> Self {
        let players: Arc<dyn PlayerServiceTrait> = Arc::new(
            PlayerService::new(repositories.players.clone(), repositories.prospects.clone())
                .with_clock(clock),
        );
        let contracts: Arc<dyn ContractServiceTrait> = Arc::new(
            ContractService::new(
                repositories.contracts.clone(),
                repositories.players.clone(),
                repositories.payments.clone(),
                repositories.catalog.clone(),
            )
            .with_clock(clock),
        );
        let pipeline = DealPipelineService::new(
            repositories.players.clone(),
            repositories.deals.clone(),
            repositories.reminders.clone(),
            repositories.catalog.clone(),
        )
        .with_contract_manager(contracts.clone())
        .with_clock(clock);

        Self {
            players,
            contracts,
            pipeline,
            payments: PaymentService::new(repositories.payments.clone()).with_clock(clock),
            reminders: ReminderService::new(repositories.reminders.clone()).with_clock(clock),
            contacts: ContactService::new(repositories.contacts.clone()),
            calendar: CalendarService::new(repositories.reminders.clone()).with_clock(clock),
            repositories,
        }
    }
}
