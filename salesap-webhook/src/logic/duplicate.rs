use crate::{algebra::client::SalesapClient, domain::step::DuplicationStep};
use salesap_domain::{DealId, InternalError, NewDeal, Relation, SalesapError};
use tracing::{error, info};

/// Fetches `deal_id`, creates its duplicate and links the two. Stops at the
/// first failing call; a duplicate whose link fails is left in place.
#[tracing::instrument(skip(client))]
pub async fn duplicate_deal(
    client: &SalesapClient,
    deal_id: &DealId,
) -> Result<DealId, SalesapError> {
    let deal = client.get_deal(deal_id).await?;

    let created = client.create_deal(&NewDeal::duplicate_of(&deal)).await?;
    let new_deal_id = created.id.ok_or_else(|| {
        InternalError::deserialize_error(&format!(
            "{} response for deal {deal_id} carries no id",
            DuplicationStep::Create
        ))
    })?;
    info!(%new_deal_id, "Created duplicate deal");

    client
        .create_relation(&Relation::linked_deals(
            deal_id.clone(),
            new_deal_id.clone(),
        ))
        .await?;

    Ok(new_deal_id)
}

/// Entry point of the detached task. Nothing is returned: the outcome only
/// shows up in the logs.
pub async fn process_webhook(client: SalesapClient, deal_id: DealId) {
    match duplicate_deal(&client, &deal_id).await {
        Ok(new_deal_id) => info!(%deal_id, %new_deal_id, "Deals linked successfully"),
        Err(e) => {
            let kind: &str = e.as_ref();
            error!(%deal_id, kind, error = %e, "Deal duplication failed");
        }
    }
}
