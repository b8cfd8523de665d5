//! Caller identity and the visibility policy.
//!
//! Every role decision in the service goes through this module:
//!
//! - [`Role::permits`] gates an [`Operation`] by role alone.
//! - [`scope_filter`] turns a caller and a requested [`ReadScope`] into the
//!   row predicate ([`ShipmentFilter`]) applied to shipment and position reads.
//! - [`Identity::status_write`] decides how a status update must be guarded.
//!
//! The policy is pure. Filters are computed before a query is issued and are
//! pushed into the query itself; rows are never dropped after a fetch.

use serde::{Deserialize, Serialize};

use crate::{Role, ShipmentId, UserId};

/// The authenticated caller, as resolved from a verified credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl Identity {
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Whether this caller may invoke `op` at all.
    #[must_use]
    pub const fn may(&self, op: Operation) -> bool {
        self.role.permits(op)
    }

    /// How a status update by this caller must be constrained.
    #[must_use]
    pub const fn status_write(&self) -> StatusWrite {
        match self.role {
            Role::Manager => StatusWrite::Unconditional,
            Role::Driver => StatusWrite::AssignedTo(self.user_id),
            Role::Customer => StatusWrite::Denied,
        }
    }
}

/// Operations exposed by the service, used for role gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateShipment,
    ReadShipments,
    UpdateStatus,
    AssignDriver,
    ReadPositions,
    ListWarehouses,
    ListDrivers,
    ListCustomers,
}

impl Role {
    /// Role-level gate for an operation.
    ///
    /// This only answers "may this role attempt the operation". Ownership
    /// (a customer's rows, a driver's assigned shipments) is enforced by
    /// [`scope_filter`] and [`Identity::status_write`].
    #[must_use]
    pub const fn permits(self, op: Operation) -> bool {
        match op {
            Operation::ReadShipments | Operation::ReadPositions => true,
            Operation::UpdateStatus | Operation::ListWarehouses => {
                matches!(self, Self::Manager | Self::Driver)
            }
            Operation::CreateShipment
            | Operation::AssignDriver
            | Operation::ListDrivers
            | Operation::ListCustomers => matches!(self, Self::Manager),
        }
    }
}

/// Guard attached to a status write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusWrite {
    /// The caller may not change status at all.
    Denied,
    /// The write applies regardless of assignment.
    Unconditional,
    /// The write applies only while `driver_id` equals this user.
    AssignedTo(UserId),
}

/// What the caller asked to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadScope {
    All,
    One(ShipmentId),
}

/// Row predicate over the `shipments` table.
///
/// `None` fields do not constrain. The default filter matches every row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipmentFilter {
    pub customer_id: Option<UserId>,
    pub shipment_id: Option<ShipmentId>,
}

impl ShipmentFilter {
    /// Evaluate the predicate against a shipment's identifying columns.
    #[must_use]
    pub fn matches(&self, shipment_id: ShipmentId, customer_id: UserId) -> bool {
        self.customer_id.is_none_or(|c| c == customer_id)
            && self.shipment_id.is_none_or(|s| s == shipment_id)
    }
}

/// Compute the row filter for a caller reading shipments or positions.
///
/// Customers are always restricted to their own rows; managers and drivers
/// are unrestricted apart from the requested ID.
#[must_use]
pub const fn scope_filter(identity: &Identity, scope: ReadScope) -> ShipmentFilter {
    let customer_id = match identity.role {
        Role::Customer => Some(identity.user_id),
        Role::Manager | Role::Driver => None,
    };
    let shipment_id = match scope {
        ReadScope::All => None,
        ReadScope::One(id) => Some(id),
    };
    ShipmentFilter {
        customer_id,
        shipment_id,
    }
}
