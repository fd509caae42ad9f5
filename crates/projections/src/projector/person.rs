//! Person, person-name and merge handlers.

use std::collections::BTreeMap;

use common::AggregateId;
use domain::events::{
    PersonCreatedData, PersonDeletedData, PersonMergedData, PersonNameAddedData,
    PersonNameRemovedData, PersonNameUpdatedData, PersonUpdatedData,
};
use domain::{ChangeSet, gendate};
use event_store::Version;

use crate::Result;
use crate::models::{FamilyReadModel, PedigreeEdge, PersonNameReadModel, PersonReadModel};
use crate::store::{ReadModelStore, WriteBatch, WriteOp};

use super::{Projector, full_name};

/// Applies a person change set field-by-field, re-deriving the full name
/// and sortable dates for every touched component.
fn apply_person_changes(
    person: &mut PersonReadModel,
    changes: &ChangeSet,
) -> std::result::Result<(), serde_json::Error> {
    if let Some(value) = changes.field("given_name")? {
        person.given_name = value;
    }
    if let Some(value) = changes.field("surname")? {
        person.surname = value;
    }
    if changes.touches("given_name") || changes.touches("surname") {
        person.full_name = full_name(person.given_name.as_deref(), person.surname.as_deref());
    }
    if let Some(value) = changes.field("gender")? {
        person.gender = value.unwrap_or_default();
    }
    if let Some(value) = changes.field::<String>("birth_date")? {
        person.birth_date_sort = value.as_deref().and_then(gendate::parse_sortable);
        person.birth_date = value;
    }
    if let Some(value) = changes.field("birth_place")? {
        person.birth_place = value;
    }
    if let Some(value) = changes.field("birth_coordinates")? {
        person.birth_coordinates = value;
    }
    if let Some(value) = changes.field::<String>("death_date")? {
        person.death_date_sort = value.as_deref().and_then(gendate::parse_sortable);
        person.death_date = value;
    }
    if let Some(value) = changes.field("death_place")? {
        person.death_place = value;
    }
    if let Some(value) = changes.field("death_coordinates")? {
        person.death_coordinates = value;
    }
    if let Some(value) = changes.field("notes")? {
        person.notes = value;
    }
    if let Some(value) = changes.field("confidence")? {
        person.confidence = value.unwrap_or_default();
    }
    Ok(())
}

impl<S: ReadModelStore> Projector<S> {
    pub(super) async fn person_created(
        &self,
        data: &PersonCreatedData,
        version: Version,
    ) -> Result<()> {
        let person = PersonReadModel {
            id: data.person_id,
            full_name: full_name(data.given_name.as_deref(), data.surname.as_deref()),
            given_name: data.given_name.clone(),
            surname: data.surname.clone(),
            gender: data.gender,
            birth_date_sort: data.birth_date.as_deref().and_then(gendate::parse_sortable),
            birth_date: data.birth_date.clone(),
            birth_place: data.birth_place.clone(),
            birth_coordinates: data.birth_coordinates,
            death_date_sort: data.death_date.as_deref().and_then(gendate::parse_sortable),
            death_date: data.death_date.clone(),
            death_place: data.death_place.clone(),
            death_coordinates: data.death_coordinates,
            notes: data.notes.clone(),
            confidence: data.confidence,
            version,
        };

        let mut batch = WriteBatch::new();
        batch.push(WriteOp::SavePerson(person));
        Ok(self.store().commit(batch).await?)
    }

    pub(super) async fn person_updated(
        &self,
        data: &PersonUpdatedData,
        version: Version,
    ) -> Result<()> {
        let Some(mut person) = self.store().person(data.person_id).await? else {
            return Ok(());
        };
        apply_person_changes(&mut person, &data.changes)?;
        person.version = version;

        let mut batch = WriteBatch::new();
        batch.push(WriteOp::SavePerson(person));
        Ok(self.store().commit(batch).await?)
    }

    pub(super) async fn person_deleted(&self, data: &PersonDeletedData) -> Result<()> {
        let mut batch = WriteBatch::new();
        for name in self.store().names_for_person(data.person_id).await? {
            batch.push(WriteOp::DeletePersonName(name.id));
        }
        batch.push(WriteOp::DeletePedigreeEdge(data.person_id));
        batch.push(WriteOp::DeletePerson(data.person_id));
        Ok(self.store().commit(batch).await?)
    }

    pub(super) async fn person_name_added(
        &self,
        data: &PersonNameAddedData,
        version: Version,
    ) -> Result<()> {
        let mut batch = WriteBatch::new();

        // At most one primary name per person: adding a new primary demotes
        // the rest.
        if data.is_primary {
            for mut name in self.store().names_for_person(data.person_id).await? {
                if name.is_primary && name.id != data.name_id {
                    name.is_primary = false;
                    name.version = version;
                    batch.push(WriteOp::SavePersonName(name));
                }
            }
        }

        batch.push(WriteOp::SavePersonName(PersonNameReadModel {
            id: data.name_id,
            person_id: data.person_id,
            name_type: data.name_type.clone(),
            full_name: full_name(data.given_name.as_deref(), data.surname.as_deref()),
            given_name: data.given_name.clone(),
            surname: data.surname.clone(),
            is_primary: data.is_primary,
            version,
        }));

        // Name events travel on the person stream and bump its version.
        if let Some(mut person) = self.store().person(data.person_id).await? {
            person.version = version;
            batch.push(WriteOp::SavePerson(person));
        }

        Ok(self.store().commit(batch).await?)
    }

    pub(super) async fn person_name_updated(
        &self,
        data: &PersonNameUpdatedData,
        version: Version,
    ) -> Result<()> {
        let Some(mut name) = self.store().person_name(data.name_id).await? else {
            return Ok(());
        };

        if let Some(value) = data.changes.field("name_type")? {
            name.name_type = value;
        }
        if let Some(value) = data.changes.field("given_name")? {
            name.given_name = value;
        }
        if let Some(value) = data.changes.field("surname")? {
            name.surname = value;
        }
        if data.changes.touches("given_name") || data.changes.touches("surname") {
            name.full_name = full_name(name.given_name.as_deref(), name.surname.as_deref());
        }
        if let Some(Some(is_primary)) = data.changes.field::<bool>("is_primary")? {
            name.is_primary = is_primary;
        }
        name.version = version;

        let mut batch = WriteBatch::new();
        if name.is_primary {
            for mut other in self.store().names_for_person(data.person_id).await? {
                if other.is_primary && other.id != name.id {
                    other.is_primary = false;
                    other.version = version;
                    batch.push(WriteOp::SavePersonName(other));
                }
            }
        }
        batch.push(WriteOp::SavePersonName(name));

        if let Some(mut person) = self.store().person(data.person_id).await? {
            person.version = version;
            batch.push(WriteOp::SavePerson(person));
        }

        Ok(self.store().commit(batch).await?)
    }

    pub(super) async fn person_name_removed(
        &self,
        data: &PersonNameRemovedData,
        version: Version,
    ) -> Result<()> {
        let mut batch = WriteBatch::new();
        batch.push(WriteOp::DeletePersonName(data.name_id));
        if let Some(mut person) = self.store().person(data.person_id).await? {
            person.version = version;
            batch.push(WriteOp::SavePerson(person));
        }
        Ok(self.store().commit(batch).await?)
    }

    /// Reconciles the merged person into the survivor across every read
    /// model that references it, then removes the merged person.
    ///
    /// The whole operation is one write batch. If the survivor is not
    /// visible in the read model the merge no-ops: the merged person is
    /// left intact rather than silently disappearing.
    pub(super) async fn person_merged(
        &self,
        data: &PersonMergedData,
        version: Version,
    ) -> Result<()> {
        let Some(mut survivor) = self.store().person(data.survivor_id).await? else {
            tracing::warn!(
                survivor = %data.survivor_id,
                merged = %data.merged_id,
                "merge survivor not in read model; leaving merged person intact"
            );
            return Ok(());
        };

        let mut batch = WriteBatch::new();

        // 1. Field resolutions apply to the survivor exactly like an update.
        apply_person_changes(&mut survivor, &data.resolved)?;
        survivor.version = version;
        batch.push(WriteOp::SavePerson(survivor.clone()));

        // Families are mutated in a working set: a family can be touched by
        // both the partner rewrite and the membership cleanup below, and the
        // last save per id must carry both mutations.
        let mut touched_families: BTreeMap<AggregateId, FamilyReadModel> = BTreeMap::new();

        // 2. Rewrite the merged person's partner slots to the survivor.
        let mut partner_family_ids = data.affected_families.clone();
        for family in self.store().families_with_partner(data.merged_id).await? {
            if !partner_family_ids.contains(&family.id) {
                partner_family_ids.push(family.id);
            }
        }
        for family_id in partner_family_ids {
            if !touched_families.contains_key(&family_id)
                && let Some(family) = self.store().family(family_id).await?
            {
                touched_families.insert(family_id, family);
            }
            let Some(family) = touched_families.get_mut(&family_id) else {
                continue;
            };
            if family.partner1_id == Some(data.merged_id) {
                family.partner1_id = Some(data.survivor_id);
                family.partner1_name = Some(survivor.full_name.clone());
            }
            if family.partner2_id == Some(data.merged_id) {
                family.partner2_id = Some(data.survivor_id);
                family.partner2_name = Some(survivor.full_name.clone());
            }
        }

        // 3. Child-family membership and pedigree edge.
        let merged_memberships = self
            .store()
            .parent_families_for_person(data.merged_id)
            .await?;
        if !merged_memberships.is_empty() {
            let survivor_has_parents = !self
                .store()
                .parent_families_for_person(data.survivor_id)
                .await?
                .is_empty();
            if survivor_has_parents {
                // The survivor keeps its own parent family; the merged
                // person's membership and edge are dropped so nothing points
                // at the removed record.
                for membership in merged_memberships {
                    batch.push(WriteOp::DeleteFamilyChild(membership.id));
                    if !touched_families.contains_key(&membership.family_id)
                        && let Some(family) = self.store().family(membership.family_id).await?
                    {
                        touched_families.insert(membership.family_id, family);
                    }
                    if let Some(family) = touched_families.get_mut(&membership.family_id) {
                        family.child_count -= 1;
                    }
                }
                batch.push(WriteOp::DeletePedigreeEdge(data.merged_id));
            } else {
                for mut membership in merged_memberships {
                    membership.person_id = data.survivor_id;
                    batch.push(WriteOp::SaveFamilyChild(membership));
                }
                if let Some(edge) = self.store().pedigree_edge(data.merged_id).await? {
                    batch.push(WriteOp::DeletePedigreeEdge(data.merged_id));
                    batch.push(WriteOp::SavePedigreeEdge(PedigreeEdge {
                        person_id: data.survivor_id,
                        version,
                        ..edge
                    }));
                }
            }
        }

        for family in touched_families.into_values() {
            batch.push(WriteOp::SaveFamily(family));
        }

        // 4. Citations whose fact owner was the merged person.
        for mut citation in self.store().citations_for_owner(data.merged_id).await? {
            citation.owner_id = data.survivor_id;
            batch.push(WriteOp::SaveCitation(citation));
        }

        // 5. Alternate names transfer; none may displace the survivor's
        // primary name.
        for mut name in self.store().names_for_person(data.merged_id).await? {
            name.person_id = data.survivor_id;
            name.is_primary = false;
            batch.push(WriteOp::SavePersonName(name));
        }

        // 6. Life events, media and attributes move owner in place.
        for mut event in self.store().events_for_owner(data.merged_id).await? {
            event.owner_id = data.survivor_id;
            batch.push(WriteOp::SaveEvent(event));
        }
        for mut media in self.store().media_for_owner(data.merged_id).await? {
            media.owner_id = data.survivor_id;
            batch.push(WriteOp::SaveMedia(media));
        }
        for mut attribute in self.store().attributes_for_person(data.merged_id).await? {
            attribute.person_id = data.survivor_id;
            batch.push(WriteOp::SaveAttribute(attribute));
        }

        // 7. The merged person disappears from the read model.
        batch.push(WriteOp::DeletePerson(data.merged_id));

        Ok(self.store().commit(batch).await?)
    }
}
