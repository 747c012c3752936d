use crate::config::ServiceConfig;
use crate::operation::{Operation, Outcome};
use rentdesk_core::availability::is_available;
use rentdesk_core::{
    AvailabilityQuery, Error, PricingSchedule, RentalRequest, ReportMonth, ReservationRecord,
    ReservationStore, Result, UtilizationReport, ValidatedRental, build_monthly_report,
    validate_request,
};
use tracing::{debug, info, instrument, warn};

/// Booking orchestrator
///
/// Runs validation, then the availability check, then persists through the
/// store. Every failure path returns before [`ReservationStore::insert`], so a
/// rejected booking leaves nothing behind.
///
/// # Examples
///
/// ```
/// use rentdesk_booking::{BookingService, ServiceConfig};
/// use rentdesk_core::mock::InMemoryReservationStore;
/// use rentdesk_core::VehicleId;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let store = InMemoryReservationStore::new();
/// store.register_vehicle(VehicleId::new("A001AA").unwrap());
/// let service = BookingService::new(store, ServiceConfig::default()).unwrap();
///
/// let cost = service.book("A001AA", "2025-01-06", "2025-01-10").await.unwrap();
/// assert_eq!(cost, 4950.0);
/// assert!(!service.check_availability("A001AA", "2025-01-13", "2025-01-14").await.unwrap());
/// # });
/// ```
pub struct BookingService<S> {
    store: S,
    config: ServiceConfig,
    schedule: PricingSchedule,
}

impl<S: ReservationStore> BookingService<S> {
    /// Create a service over `store` with the standard pricing schedule.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if `config` fails validation.
    pub fn new(store: S, config: ServiceConfig) -> Result<Self> {
        Self::with_schedule(store, config, PricingSchedule::standard())
    }

    /// Create a service with a custom pricing schedule.
    pub fn with_schedule(store: S, config: ServiceConfig, schedule: PricingSchedule) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            schedule,
        })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Price a rental of `days` days without touching the store.
    ///
    /// # Errors
    /// - `Error::PeriodTooLong` if `days` exceeds the configured maximum
    /// - `Error::InvalidInput` if `days` is negative
    #[instrument(skip(self))]
    pub fn quote(&self, days: i64) -> Result<f64> {
        let max = self.config.max_rent_period;
        if days > i64::from(max) {
            return Err(Error::PeriodTooLong { days, max });
        }
        self.schedule.cost(days, self.config.base_cost)
    }

    /// Validate, check and reserve a rental, returning its cost.
    ///
    /// # Errors
    /// - Input errors from validation, in validation order
    /// - `Error::VehicleBusy` if the padded window is taken
    /// - `Error::VehicleNotFound` for an unknown or retired vehicle
    /// - Store errors unchanged, including `Error::ConcurrentReservation`
    #[instrument(skip(self))]
    pub async fn book(&self, vehicle: &str, start: &str, end: &str) -> Result<f64> {
        let request = RentalRequest::parse(vehicle, start, end)?;
        self.book_request(&request).await
    }

    /// Book a request that already went through the typed parse step.
    #[instrument(skip(self, request), fields(vehicle = %request.vehicle(), days = tracing::field::Empty))]
    pub async fn book_request(&self, request: &RentalRequest) -> Result<f64> {
        let rental = self.validate(request)?;
        tracing::Span::current().record("days", rental.period.days());
        self.reserve(rental).await
    }

    /// Whether the vehicle could be booked for the interval right now.
    ///
    /// # Errors
    /// Same as [`BookingService::book`] except `Error::VehicleBusy`.
    #[instrument(skip(self))]
    pub async fn check_availability(&self, vehicle: &str, start: &str, end: &str) -> Result<bool> {
        let request = RentalRequest::parse(vehicle, start, end)?;
        let rental = self.validate(&request)?;
        let query = self.availability_query(&rental);
        is_available(&query, &self.store).await
    }

    /// Utilization of every reserved vehicle over `month`.
    ///
    /// # Errors
    /// - `Error::NoData` if nothing was reserved in the month
    /// - Store errors unchanged
    #[instrument(skip(self, month), fields(month = %month))]
    pub async fn report(&self, month: ReportMonth) -> Result<UtilizationReport> {
        let occupancy = self.store.monthly_occupancy(month).await?;
        let report = build_monthly_report(month, &occupancy, month.days())?;
        debug!(
            vehicles = report.summary.vehicle_count,
            average = report.summary.average_percentage,
            "Built utilization report"
        );
        Ok(report)
    }

    /// Run one [`Operation`].
    pub async fn dispatch(&self, operation: Operation) -> Result<Outcome> {
        debug!(operation = operation.name(), "Dispatching");
        let outcome = match operation {
            Operation::Quote { days } => Outcome::Quote {
                cost: self.quote(days)?,
            },
            Operation::Book {
                vehicle,
                start,
                end,
            } => Outcome::Booked {
                cost: self.book(&vehicle, &start, &end).await?,
            },
            Operation::CheckAvailability {
                vehicle,
                start,
                end,
            } => Outcome::Availability {
                available: self.check_availability(&vehicle, &start, &end).await?,
            },
            Operation::Report { month } => Outcome::Report(self.report(month).await?),
        };
        Ok(outcome)
    }

    fn validate(&self, request: &RentalRequest) -> Result<ValidatedRental> {
        validate_request(request, self.config.max_rent_period)
    }

    fn availability_query(&self, rental: &ValidatedRental) -> AvailabilityQuery {
        AvailabilityQuery::new(
            rental.vehicle.clone(),
            rental.period.interval(),
            self.config.buffer_days,
        )
    }

    async fn reserve(&self, rental: ValidatedRental) -> Result<f64> {
        let query = self.availability_query(&rental);
        if !is_available(&query, &self.store).await? {
            warn!(vehicle = %rental.vehicle, "Vehicle busy for requested period");
            return Err(Error::VehicleBusy {
                vehicle: rental.vehicle.to_string(),
            });
        }

        let cost = self
            .schedule
            .cost(i64::from(rental.period.days()), self.config.base_cost)?;
        let guard = query.padded_window()?;
        let record = ReservationRecord::new(rental.vehicle, rental.period.interval(), cost);
        self.store.insert(&record, guard).await?;

        info!(
            vehicle = %record.vehicle,
            start = %record.interval.start(),
            end = %record.interval.end(),
            cost,
            "Booking confirmed"
        );
        Ok(cost)
    }
}
