//! The planning interface shared by every trip generator.

use thiserror::Error;

use crate::{TripPlan, TripRequest, TripRequestValidationError};

/// Errors returned by [`TripPlanner::plan`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The request failed validation and never reached the pipeline.
    #[error("invalid trip request: {0}")]
    InvalidRequest(#[from] TripRequestValidationError),
    /// Nothing in the catalog fits the interests, distance range and budget.
    ///
    /// This is an expected business outcome, not a fault; retrying the same
    /// request yields the same answer.
    #[error("no eligible stops fit the distance range and time budget")]
    NoEligibleStops,
    /// A language-model reply held no usable trip plan.
    #[error("malformed model output: {reason}")]
    MalformedModelOutput {
        /// Why the reply was rejected.
        reason: String,
    },
    /// The language-model service could not be reached or refused the call.
    #[error("model service failed: {message}")]
    ModelService {
        /// Description of the failure.
        message: String,
    },
}

/// Produce a trip plan for a request.
///
/// Implementations must validate the request and return
/// [`PlanError::InvalidRequest`] rather than panicking, and must report an
/// empty itinerary as [`PlanError::NoEligibleStops`]. Planners are shared
/// between request handlers, so they must be `Send + Sync`.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use journeo_core::{PlanError, TripPlan, TripPlanner, TripRequest};
///
/// struct NothingNearby;
///
/// impl TripPlanner for NothingNearby {
///     fn plan(&self, request: &TripRequest) -> Result<TripPlan, PlanError> {
///         request.validate()?;
///         Err(PlanError::NoEligibleStops)
///     }
/// }
///
/// let request = TripRequest::new(Coord { x: 78.1, y: 9.9 }, ["temple"], 60);
/// assert_eq!(NothingNearby.plan(&request), Err(PlanError::NoEligibleStops));
/// ```
pub trait TripPlanner: Send + Sync {
    /// Plan a trip, producing an itinerary or an error.
    fn plan(&self, request: &TripRequest) -> Result<TripPlan, PlanError>;
}

impl<P> TripPlanner for Box<P>
where
    P: TripPlanner + ?Sized,
{
    fn plan(&self, request: &TripRequest) -> Result<TripPlan, PlanError> {
        (**self).plan(request)
    }
}

impl<P> TripPlanner for std::sync::Arc<P>
where
    P: TripPlanner + ?Sized,
{
    fn plan(&self, request: &TripRequest) -> Result<TripPlan, PlanError> {
        (**self).plan(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::rstest;

    struct RejectingPlanner;

    impl TripPlanner for RejectingPlanner {
        fn plan(&self, request: &TripRequest) -> Result<TripPlan, PlanError> {
            request.validate()?;
            Err(PlanError::NoEligibleStops)
        }
    }

    #[rstest]
    fn validation_errors_convert_into_plan_errors() {
        let request = TripRequest::new(Coord { x: 0.0, y: 95.0 }, ["park"], 60);
        let err = RejectingPlanner
            .plan(&request)
            .expect_err("latitude should be rejected");
        assert!(matches!(
            err,
            PlanError::InvalidRequest(TripRequestValidationError::LatitudeOutOfRange { .. })
        ));
    }

    #[rstest]
    fn boxed_planners_delegate() {
        let planner: Box<dyn TripPlanner> = Box::new(RejectingPlanner);
        let request = TripRequest::new(Coord { x: 0.0, y: 0.0 }, ["park"], 60);
        assert_eq!(planner.plan(&request), Err(PlanError::NoEligibleStops));
    }
}
