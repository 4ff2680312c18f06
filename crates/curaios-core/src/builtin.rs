//! Built-in table contents.

use curaios_common::{AuthorityId, EntityKind};

use crate::tables::{DataTypeVariants, KnowledgeBase, LocalMappingTable, MappingTemplate, SpecialCaseTable};

type Synonyms = &'static [&'static str];

// (synonyms, canonical name, NCBI taxonomy id, alternatives)
const ORGANISMS: &[(Synonyms, &str, u32, Synonyms)] = &[
    (&["human", "humans", "homo sapiens", "h. sapiens"], "Homo sapiens", 9606, &["Human"]),
    (&["mouse", "mice", "mus musculus", "m. musculus", "house mouse"], "Mus musculus", 10090, &["Mouse", "House mouse"]),
    (&["rat", "rats", "rattus norvegicus", "r. norvegicus", "norway rat"], "Rattus norvegicus", 10116, &["Rat", "Norway rat"]),
    (&["zebrafish", "zebra fish", "danio rerio", "d. rerio"], "Danio rerio", 7955, &["Zebrafish"]),
    (&["fruit fly", "fruitfly", "drosophila", "drosophila melanogaster", "d. melanogaster"], "Drosophila melanogaster", 7227, &["Fruit fly"]),
    (&["yeast", "budding yeast", "bakers yeast", "saccharomyces cerevisiae", "s. cerevisiae"], "Saccharomyces cerevisiae", 4932, &["Baker's yeast", "Budding yeast"]),
    (&["e. coli", "e.coli", "ecoli", "escherichia coli"], "Escherichia coli", 562, &["E. coli"]),
    (&["c. elegans", "c.elegans", "nematode", "caenorhabditis elegans"], "Caenorhabditis elegans", 6239, &["C. elegans", "Nematode"]),
    (&["arabidopsis", "arabidopsis thaliana", "a. thaliana", "thale cress"], "Arabidopsis thaliana", 3702, &["Thale cress"]),
    (&["chicken", "gallus gallus"], "Gallus gallus", 9031, &["Chicken"]),
    (&["pig", "swine", "sus scrofa"], "Sus scrofa", 9823, &["Pig", "Swine"]),
    (&["cow", "cattle", "bovine", "bos taurus"], "Bos taurus", 9913, &["Cattle", "Cow"]),
    (&["rhesus macaque", "rhesus monkey", "macaque", "macaca mulatta"], "Macaca mulatta", 9544, &["Rhesus macaque"]),
    (&["sars-cov-2", "sars cov 2", "sarscov2"], "Severe acute respiratory syndrome coronavirus 2", 2697049, &["SARS-CoV-2"]),
];

// (synonyms, canonical name, MeSH descriptor UI, alternatives)
const DISEASES: &[(Synonyms, &str, &str, Synonyms)] = &[
    (&["alzheimers", "alzheimers disease", "alzheimer disease", "alzheimer"], "Alzheimer's Disease", "D000544", &["Alzheimer Disease", "Alzheimer Dementia"]),
    (&["parkinsons", "parkinsons disease", "parkinson disease", "parkinson"], "Parkinson Disease", "D010300", &["Parkinson's Disease"]),
    (&["diabetes", "diabetes mellitus"], "Diabetes Mellitus", "D003920", &["Diabetes"]),
    (&["type 2 diabetes", "diabetes type 2", "type ii diabetes", "t2d"], "Diabetes Mellitus, Type 2", "D003924", &["Type 2 Diabetes", "T2D"]),
    (&["type 1 diabetes", "diabetes type 1", "type i diabetes", "t1d"], "Diabetes Mellitus, Type 1", "D003922", &["Type 1 Diabetes", "T1D"]),
    (&["breast cancer", "breast neoplasms", "breast tumor", "breast carcinoma"], "Breast Neoplasms", "D001943", &["Breast Cancer"]),
    (&["lung cancer", "lung neoplasms", "lung tumor", "lung carcinoma"], "Lung Neoplasms", "D008175", &["Lung Cancer"]),
    (&["colorectal cancer", "colon cancer", "colorectal neoplasms", "crc"], "Colorectal Neoplasms", "D015179", &["Colorectal Cancer"]),
    (&["covid-19", "covid19", "covid", "coronavirus disease 2019"], "COVID-19", "D000086382", &["Coronavirus Disease 2019"]),
    (&["asthma", "bronchial asthma"], "Asthma", "D001249", &["Bronchial Asthma"]),
    (&["hypertension", "high blood pressure"], "Hypertension", "D006973", &["High Blood Pressure"]),
    (&["multiple sclerosis"], "Multiple Sclerosis", "D009103", &["MS"]),
    (&["obesity", "obese"], "Obesity", "D009765", &[]),
    (&["tuberculosis", "tb"], "Tuberculosis", "D014376", &["TB"]),
    (&["hiv", "hiv infection", "hiv infections", "aids"], "HIV Infections", "D015658", &["HIV Infection", "AIDS"]),
];

// (synonyms, canonical name, alternatives)
const DATA_TYPES: &[(Synonyms, &str, Synonyms)] = &[
    (&["rnaseq", "rna-seq", "rna seq", "rna sequencing", "bulk rna-seq", "transcriptome sequencing"], "RNAseq", &["RNA-seq", "RNA sequencing"]),
    (&["scrnaseq", "scrna-seq", "scrna seq", "single-cell rna-seq", "single cell rna-seq", "single-cell rna sequencing"], "scRNAseq", &["scRNA-seq", "Single-cell RNA-seq"]),
    (&["microarray", "microarrays", "expression microarray", "gene expression microarray"], "Microarray", &["Expression array"]),
    (&["wgs", "whole genome sequencing", "whole-genome sequencing"], "WGS", &["Whole genome sequencing"]),
    (&["wes", "whole exome sequencing", "whole-exome sequencing", "exome sequencing"], "WES", &["Whole exome sequencing"]),
    (&["atac-seq", "atacseq", "atac seq"], "ATAC-seq", &["ATAC sequencing"]),
    (&["chip-seq", "chipseq", "chip seq"], "ChIP-seq", &["ChIP sequencing"]),
    (&["proteomics", "proteome"], "Proteomics", &["Mass spectrometry proteomics"]),
    (&["metabolomics", "metabolome"], "Metabolomics", &[]),
    (&["metagenomics", "metagenome", "shotgun metagenomics"], "Metagenomics", &["Metagenomic sequencing"]),
];

const COMMON_VIRUSES: &[&str] = &[
    "HIV",
    "SARS-CoV-2",
    "H1N1",
    "Ebola virus",
    "Zika virus",
    "Hepatitis C virus",
    "Human papillomavirus",
    "Influenza virus",
    "Herpes simplex virus",
    "Dengue virus",
];

const DATA_TYPE_VARIANTS: &[(&str, Synonyms)] = &[
    ("RNAseq", &["rna-seq", "rna seq", "rnaseq", "rna sequencing", "transcriptomics"]),
    ("scRNAseq", &["single cell rna seq", "scrna-seq", "single-cell rna-seq", "single cell transcriptomics", "sc-rna-seq", "single cell sequencing"]),
    ("Microarray", &["array", "expression array", "gene expression array", "chip"]),
    ("WGS", &["whole genome sequencing", "genome sequencing", "complete genome"]),
    ("WES", &["whole exome sequencing", "exome sequencing", "exome"]),
    ("ATAC-seq", &["atac seq", "atacseq", "chromatin accessibility"]),
    ("ChIP-seq", &["chip seq", "chipseq", "chromatin immunoprecipitation"]),
    ("Proteomics", &["mass spectrometry", "ms/ms", "protein expression", "proteome"]),
    ("Metabolomics", &["metabolite profiling", "metabolite analysis", "metabolome"]),
    ("Metagenomics", &["metagenomic sequencing", "microbiome sequencing", "microbiome analysis"]),
];

pub(crate) fn knowledge_base() -> KnowledgeBase {
    let mut organisms = LocalMappingTable::new();
    for (keys, name, taxon, alts) in ORGANISMS {
        organisms.insert_all(keys, MappingTemplate::new(*name, Some(AuthorityId::Taxonomy(*taxon)), alts));
    }

    let mut diseases = LocalMappingTable::new();
    for (keys, name, ui, alts) in DISEASES {
        diseases.insert_all(keys, MappingTemplate::new(*name, Some(AuthorityId::Mesh(ui.to_string())), alts));
    }

    let mut data_types = LocalMappingTable::new();
    for (keys, name, alts) in DATA_TYPES {
        data_types.insert_all(keys, MappingTemplate::new(*name, None, alts));
    }

    let mut special_cases = SpecialCaseTable::default();
    special_cases.insert("virus", EntityKind::Organism, COMMON_VIRUSES);
    special_cases.insert("viruses", EntityKind::Organism, COMMON_VIRUSES);
    special_cases.insert("cancer", EntityKind::Disease, &["neoplasm", "tumor", "carcinoma", "leukemia", "lymphoma"]);
    special_cases.insert("infectious disease", EntityKind::Disease, &["infection", "bacterial infection", "viral infection"]);

    let mut data_type_variants = DataTypeVariants::default();
    for (canonical, variants) in DATA_TYPE_VARIANTS {
        data_type_variants.push(canonical, variants);
    }

    KnowledgeBase { organisms, diseases, data_types, special_cases, data_type_variants }
}
