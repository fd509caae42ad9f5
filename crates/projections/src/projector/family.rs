//! Family, child link/unlink and pedigree edge handlers.

use common::AggregateId;
use domain::events::{
    FamilyChildAddedData, FamilyChildRemovedData, FamilyCreatedData, FamilyDeletedData,
    FamilyUpdatedData,
};
use domain::{Gender, gendate};
use event_store::Version;

use crate::Result;
use crate::models::{FamilyChildReadModel, FamilyReadModel, PedigreeEdge};
use crate::store::{ReadModelStore, WriteBatch, WriteOp};

use super::Projector;

impl<S: ReadModelStore> Projector<S> {
    /// Denormalized display name for a partner slot; empty when the partner
    /// person is not (yet) visible in the read model.
    async fn partner_display_name(&self, partner_id: Option<AggregateId>) -> Result<Option<String>> {
        Ok(match partner_id {
            Some(id) => self.store().person(id).await?.map(|p| p.full_name),
            None => None,
        })
    }

    /// Derives a child's pedigree edge from the family's current partners.
    ///
    /// Gender picks the slot; when both partners share a gender the
    /// later-assigned partner wins that slot. Unknown gender fills neither.
    async fn derive_pedigree_edge(
        &self,
        family: &FamilyReadModel,
        person_id: AggregateId,
        version: Version,
    ) -> Result<PedigreeEdge> {
        let mut edge = PedigreeEdge {
            person_id,
            father_id: None,
            father_name: None,
            mother_id: None,
            mother_name: None,
            version,
        };
        for partner_id in [family.partner1_id, family.partner2_id].into_iter().flatten() {
            if let Some(partner) = self.store().person(partner_id).await? {
                match partner.gender {
                    Gender::Male => {
                        edge.father_id = Some(partner_id);
                        edge.father_name = Some(partner.full_name);
                    }
                    Gender::Female => {
                        edge.mother_id = Some(partner_id);
                        edge.mother_name = Some(partner.full_name);
                    }
                    Gender::Unknown => {}
                }
            }
        }
        Ok(edge)
    }

    pub(super) async fn family_created(
        &self,
        data: &FamilyCreatedData,
        version: Version,
    ) -> Result<()> {
        let family = FamilyReadModel {
            id: data.family_id,
            partner1_id: data.partner1_id,
            partner1_name: self.partner_display_name(data.partner1_id).await?,
            partner2_id: data.partner2_id,
            partner2_name: self.partner_display_name(data.partner2_id).await?,
            relationship_type: data.relationship_type,
            marriage_date_sort: data
                .marriage_date
                .as_deref()
                .and_then(gendate::parse_sortable),
            marriage_date: data.marriage_date.clone(),
            marriage_place: data.marriage_place.clone(),
            child_count: 0,
            version,
        };

        let mut batch = WriteBatch::new();
        batch.push(WriteOp::SaveFamily(family));
        Ok(self.store().commit(batch).await?)
    }

    pub(super) async fn family_updated(
        &self,
        data: &FamilyUpdatedData,
        version: Version,
    ) -> Result<()> {
        let Some(mut family) = self.store().family(data.family_id).await? else {
            return Ok(());
        };

        if let Some(value) = data.changes.field("partner1_id")? {
            family.partner1_id = value;
        }
        if let Some(value) = data.changes.field("partner2_id")? {
            family.partner2_id = value;
        }
        if let Some(value) = data.changes.field("relationship_type")? {
            family.relationship_type = value.unwrap_or_default();
        }
        if let Some(value) = data.changes.field::<String>("marriage_date")? {
            family.marriage_date_sort = value.as_deref().and_then(gendate::parse_sortable);
            family.marriage_date = value;
        }
        if let Some(value) = data.changes.field("marriage_place")? {
            family.marriage_place = value;
        }
        family.version = version;

        let mut batch = WriteBatch::new();

        // A partner change invalidates the denormalized names and every
        // current child's cached parent pointers.
        let partners_touched =
            data.changes.touches("partner1_id") || data.changes.touches("partner2_id");
        if partners_touched {
            family.partner1_name = self.partner_display_name(family.partner1_id).await?;
            family.partner2_name = self.partner_display_name(family.partner2_id).await?;
            for membership in self.store().children_of_family(family.id).await? {
                let edge = self
                    .derive_pedigree_edge(&family, membership.person_id, version)
                    .await?;
                batch.push(WriteOp::SavePedigreeEdge(edge));
            }
        }

        batch.push(WriteOp::SaveFamily(family));
        Ok(self.store().commit(batch).await?)
    }

    pub(super) async fn family_deleted(&self, data: &FamilyDeletedData) -> Result<()> {
        let mut batch = WriteBatch::new();
        // Cascade first: children and their derived pedigree edges, then the
        // family itself.
        for membership in self.store().children_of_family(data.family_id).await? {
            batch.push(WriteOp::DeleteFamilyChild(membership.id));
            batch.push(WriteOp::DeletePedigreeEdge(membership.person_id));
        }
        batch.push(WriteOp::DeleteFamily(data.family_id));
        Ok(self.store().commit(batch).await?)
    }

    pub(super) async fn family_child_added(
        &self,
        data: &FamilyChildAddedData,
        version: Version,
    ) -> Result<()> {
        let Some(mut family) = self.store().family(data.family_id).await? else {
            return Ok(());
        };

        // Upsert: a re-link of the same person keeps the existing row and
        // does not inflate the count.
        let existing = self
            .store()
            .children_of_family(data.family_id)
            .await?
            .into_iter()
            .find(|c| c.person_id == data.person_id);
        let membership = match existing {
            Some(mut row) => {
                row.relationship = data.relationship;
                row.sequence = data.sequence;
                row.version = version;
                row
            }
            None => {
                family.child_count += 1;
                FamilyChildReadModel {
                    id: data.membership_id,
                    family_id: data.family_id,
                    person_id: data.person_id,
                    relationship: data.relationship,
                    sequence: data.sequence,
                    version,
                }
            }
        };

        let edge = self
            .derive_pedigree_edge(&family, data.person_id, version)
            .await?;
        family.version = version;

        let mut batch = WriteBatch::new();
        batch.push(WriteOp::SaveFamilyChild(membership));
        batch.push(WriteOp::SavePedigreeEdge(edge));
        batch.push(WriteOp::SaveFamily(family));
        Ok(self.store().commit(batch).await?)
    }

    pub(super) async fn family_child_removed(
        &self,
        data: &FamilyChildRemovedData,
        version: Version,
    ) -> Result<()> {
        let membership = self
            .store()
            .children_of_family(data.family_id)
            .await?
            .into_iter()
            .find(|c| c.person_id == data.person_id);
        let Some(membership) = membership else {
            return Ok(());
        };

        let mut batch = WriteBatch::new();
        batch.push(WriteOp::DeleteFamilyChild(membership.id));
        batch.push(WriteOp::DeletePedigreeEdge(data.person_id));
        if let Some(mut family) = self.store().family(data.family_id).await? {
            family.child_count -= 1;
            family.version = version;
            batch.push(WriteOp::SaveFamily(family));
        }
        Ok(self.store().commit(batch).await?)
    }
}
