//! Source and citation handlers with citation-count maintenance.

use domain::events::{
    CitationCreatedData, CitationDeletedData, CitationUpdatedData, SourceCreatedData,
    SourceDeletedData, SourceUpdatedData,
};
use event_store::Version;

use crate::Result;
use crate::models::{CitationReadModel, SourceReadModel};
use crate::store::{ReadModelStore, WriteBatch, WriteOp};

use super::Projector;

impl<S: ReadModelStore> Projector<S> {
    pub(super) async fn source_created(
        &self,
        data: &SourceCreatedData,
        version: Version,
    ) -> Result<()> {
        // Citation streams are not ordered against the source stream, so
        // citations may already be present: the maintained count starts from
        // the live rows.
        let citation_count = self
            .store()
            .citations_for_source(data.source_id)
            .await?
            .len() as i64;

        let source = SourceReadModel {
            id: data.source_id,
            title: data.title.clone(),
            author: data.author.clone(),
            publication: data.publication.clone(),
            repository: data.repository.clone(),
            citation_count,
            version,
        };

        let mut batch = WriteBatch::new();
        batch.push(WriteOp::SaveSource(source));
        Ok(self.store().commit(batch).await?)
    }

    pub(super) async fn source_updated(
        &self,
        data: &SourceUpdatedData,
        version: Version,
    ) -> Result<()> {
        let Some(mut source) = self.store().source(data.source_id).await? else {
            return Ok(());
        };

        if let Some(Some(title)) = data.changes.field::<String>("title")? {
            source.title = title;
        }
        if let Some(value) = data.changes.field("author")? {
            source.author = value;
        }
        if let Some(value) = data.changes.field("publication")? {
            source.publication = value;
        }
        if let Some(value) = data.changes.field("repository")? {
            source.repository = value;
        }
        source.version = version;

        let mut batch = WriteBatch::new();
        batch.push(WriteOp::SaveSource(source));
        Ok(self.store().commit(batch).await?)
    }

    pub(super) async fn source_deleted(&self, data: &SourceDeletedData) -> Result<()> {
        let mut batch = WriteBatch::new();
        // Cascade: the source's citations go first.
        for citation in self.store().citations_for_source(data.source_id).await? {
            batch.push(WriteOp::DeleteCitation(citation.id));
        }
        batch.push(WriteOp::DeleteSource(data.source_id));
        Ok(self.store().commit(batch).await?)
    }

    pub(super) async fn citation_created(
        &self,
        data: &CitationCreatedData,
        version: Version,
    ) -> Result<()> {
        let citation = CitationReadModel {
            id: data.citation_id,
            source_id: data.source_id,
            fact_type: data.fact_type.clone(),
            owner_id: data.owner_id,
            page: data.page.clone(),
            text: data.text.clone(),
            version,
        };

        let mut batch = WriteBatch::new();
        batch.push(WriteOp::SaveCitation(citation));
        if let Some(mut source) = self.store().source(data.source_id).await? {
            source.citation_count += 1;
            batch.push(WriteOp::SaveSource(source));
        }
        Ok(self.store().commit(batch).await?)
    }

    pub(super) async fn citation_updated(
        &self,
        data: &CitationUpdatedData,
        version: Version,
    ) -> Result<()> {
        let Some(mut citation) = self.store().citation(data.citation_id).await? else {
            return Ok(());
        };

        let mut batch = WriteBatch::new();

        // Rewiring the citation to another source moves the maintained count
        // with it.
        if let Some(Some(new_source_id)) = data.changes.field("source_id")?
            && new_source_id != citation.source_id
        {
            if let Some(mut old_source) = self.store().source(citation.source_id).await? {
                old_source.citation_count -= 1;
                batch.push(WriteOp::SaveSource(old_source));
            }
            if let Some(mut new_source) = self.store().source(new_source_id).await? {
                new_source.citation_count += 1;
                batch.push(WriteOp::SaveSource(new_source));
            }
            citation.source_id = new_source_id;
        }

        if let Some(Some(fact_type)) = data.changes.field::<String>("fact_type")? {
            citation.fact_type = fact_type;
        }
        if let Some(Some(owner_id)) = data.changes.field("owner_id")? {
            citation.owner_id = owner_id;
        }
        if let Some(value) = data.changes.field("page")? {
            citation.page = value;
        }
        if let Some(value) = data.changes.field("text")? {
            citation.text = value;
        }
        citation.version = version;

        batch.push(WriteOp::SaveCitation(citation));
        Ok(self.store().commit(batch).await?)
    }

    pub(super) async fn citation_deleted(&self, data: &CitationDeletedData) -> Result<()> {
        let Some(citation) = self.store().citation(data.citation_id).await? else {
            return Ok(());
        };

        let mut batch = WriteBatch::new();
        batch.push(WriteOp::DeleteCitation(citation.id));
        if let Some(mut source) = self.store().source(citation.source_id).await? {
            source.citation_count -= 1;
            batch.push(WriteOp::SaveSource(source));
        }
        Ok(self.store().commit(batch).await?)
    }
}
