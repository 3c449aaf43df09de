//! English and Spanish UI strings.
//!
//! Every piece of text the renderer shows goes through [I18n::tr], so switching the
//! language (Ctrl+E) only changes the [Language] held in the navigation state.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Language::English),
            "es" | "spanish" | "español" | "espanol" => Some(Language::Spanish),
            _ => None,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Language::English => Language::Spanish,
            Language::Spanish => Language::English,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Español",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    AppTitle,
    Current,
    Step1Title,
    Step2Title,
    Step3Title,
    Step4Title,
    ProcessingTitle,
    FinishedTitle,
    FilterPrompt,
    GoToParent,
    EmptyListing,
    NoMatches,
    HintMove,
    HintSelect,
    HintInto,
    HintUp,
    HintSelectCurrent,
    HintFilter,
    HintClearFilter,
    HintAdvanced,
    HintQuit,
    HintFilterKeys,
    HintEditKeys,
    SelectedDirectory,
    OutputPrompt,
    WillSaveAs,
    FileSavedIn,
    ToggleExtension,
    ContinueBack,
    LabelPrompt,
    LabelOptional,
    ReviewSettings,
    Directory,
    Output,
    Label,
    Format,
    Debug,
    Enabled,
    Disabled,
    NoneValue,
    EditDirectory,
    EditOutput,
    EditLabel,
    CycleFormat,
    ToggleDebug,
    AdvancedTitle,
    ExitAdvanced,
    EnterToStart,
    BackHint,
    Processing,
    ProcessingDetails,
    ProcessingSuccess,
    ProcessingFailed,
    FilesProcessed,
    Multiple,
    SavedTo,
    ReadyToUse,
    CompanionOutput,
    NotFoundTitle,
    RequiredFiles,
    SearchedIn,
    InterpreterMissing,
    InstallPython,
    LaunchFailed,
    ExitFailed,
    FinishedKeys,
    FooterQuit,
    FooterReset,
    FooterLanguage,
    AdvancedBadge,
    FormatExcel,
    FormatCsv,
    FormatBoth,
}

#[derive(Debug, Clone, Copy)]
pub struct I18n {
    language: Language,
}

impl I18n {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(self) -> Language {
        self.language
    }

    pub fn tr(self, key: TextKey) -> &'static str {
        match self.language {
            Language::English => english(key),
            Language::Spanish => spanish(key),
        }
    }
}

fn english(key: TextKey) -> &'static str {
    use TextKey as T;
    match key {
        T::AppTitle => "📁 File Metadata Indexer",
        T::Current => "📍 Current",
        T::Step1Title => "Step 1: Navigate and Select Directory",
        T::Step2Title => "Step 2: Output File Name",
        T::Step3Title => "Step 3: Litigant Name",
        T::Step4Title => "Step 4: Confirm Settings",
        T::ProcessingTitle => "Processing",
        T::FinishedTitle => "Finished",
        T::FilterPrompt => "🔍 Filter:",
        T::GoToParent => "Go up to parent directory",
        T::EmptyListing => "(no subdirectories with files here)",
        T::NoMatches => "(no matches)",
        T::HintMove => "↑↓/jk browse",
        T::HintSelect => "Enter select highlighted",
        T::HintInto => "→/l open",
        T::HintUp => "←/h up",
        T::HintSelectCurrent => "Space select current",
        T::HintFilter => "i or / filter",
        T::HintClearFilter => "Esc clear filter",
        T::HintAdvanced => "Ctrl+D advanced mode",
        T::HintQuit => "q quit",
        T::HintFilterKeys => "Type to filter  Tab auto-complete  Enter apply  Esc cancel",
        T::HintEditKeys => "←→ move cursor  Home/End  Backspace/Del erase",
        T::SelectedDirectory => "Selected directory:",
        T::OutputPrompt => "Output file name:",
        T::WillSaveAs => "💾 Will save as:",
        T::FileSavedIn => "• File saved in the selected directory",
        T::ToggleExtension => "• Tab toggles the extension (.xlsx / .csv)",
        T::ContinueBack => "• Enter to continue, Esc to go back",
        T::LabelPrompt => "Name shown in the report header:",
        T::LabelOptional => "• Optional: leave empty to skip",
        T::ReviewSettings => "Review settings:",
        T::Directory => "Directory:",
        T::Output => "Output:",
        T::Label => "Litigant:",
        T::Format => "Format:",
        T::Debug => "Debug:",
        T::Enabled => "enabled",
        T::Disabled => "disabled",
        T::NoneValue => "(none)",
        T::EditDirectory => "1 = Change directory",
        T::EditOutput => "2 = Change filename",
        T::EditLabel => "3 = Change litigant",
        T::CycleFormat => "f/4 = Cycle format",
        T::ToggleDebug => "d = Toggle debug",
        T::AdvancedTitle => "ADVANCED MODE - more options available:",
        T::ExitAdvanced => "Ctrl+D = Leave advanced mode",
        T::EnterToStart => "⏩ Enter to start processing",
        T::BackHint => "b/Esc to go back",
        T::Processing => "⏳ Processing files...",
        T::ProcessingDetails => {
            "🔄 Scanning directory and extracting metadata\n📊 This may take a while for large directories"
        }
        T::ProcessingSuccess => "✅ Processing completed successfully!",
        T::ProcessingFailed => "❌ Processing failed",
        T::FilesProcessed => "📋 Files processed:",
        T::Multiple => "multiple",
        T::SavedTo => "💾 Saved to:",
        T::ReadyToUse => "🎉 Your file index is ready to use!",
        T::CompanionOutput => "📋 Output:",
        T::NotFoundTitle => "Could not find the metadata extractor.",
        T::RequiredFiles => "Required files next to fidx or in the working directory:",
        T::SearchedIn => "Searched:",
        T::InterpreterMissing => "Python is not installed or not in PATH.",
        T::InstallPython => "Install Python 3 and make sure its command is on PATH.",
        T::LaunchFailed => "Could not launch the metadata extractor.",
        T::ExitFailed => "The metadata extractor reported an error.",
        T::FinishedKeys => "r restart  b retry  Enter/q quit",
        T::FooterQuit => "Ctrl+C quit",
        T::FooterReset => "Ctrl+R reset",
        T::FooterLanguage => "Ctrl+E language",
        T::AdvancedBadge => "ADVANCED",
        T::FormatExcel => "Excel (.xlsx)",
        T::FormatCsv => "CSV (.csv)",
        T::FormatBoth => "Excel + CSV",
    }
}

fn spanish(key: TextKey) -> &'static str {
    use TextKey as T;
    match key {
        T::AppTitle => "📁 Indexador de Metadatos de Archivos",
        T::Current => "📍 Actual",
        T::Step1Title => "Paso 1: Navegar y Seleccionar Directorio",
        T::Step2Title => "Paso 2: Nombre del Archivo de Salida",
        T::Step3Title => "Paso 3: Nombre del Litigante",
        T::Step4Title => "Paso 4: Confirmar Configuración",
        T::ProcessingTitle => "Procesando",
        T::FinishedTitle => "Finalizado",
        T::FilterPrompt => "🔍 Filtrar:",
        T::GoToParent => "Ir al directorio padre",
        T::EmptyListing => "(no hay subdirectorios con archivos)",
        T::NoMatches => "(sin coincidencias)",
        T::HintMove => "↑↓/jk explorar",
        T::HintSelect => "Enter seleccionar resaltado",
        T::HintInto => "→/l entrar",
        T::HintUp => "←/h subir",
        T::HintSelectCurrent => "Espacio seleccionar actual",
        T::HintFilter => "i o / filtrar",
        T::HintClearFilter => "Esc quitar filtro",
        T::HintAdvanced => "Ctrl+D modo avanzado",
        T::HintQuit => "q salir",
        T::HintFilterKeys => "Escribe para filtrar  Tab autocompletar  Enter aplicar  Esc cancelar",
        T::HintEditKeys => "←→ mover cursor  Inicio/Fin  Retroceso/Supr borrar",
        T::SelectedDirectory => "Directorio seleccionado:",
        T::OutputPrompt => "Nombre del archivo de salida:",
        T::WillSaveAs => "💾 Se guardará como:",
        T::FileSavedIn => "• Archivo guardado en el directorio seleccionado",
        T::ToggleExtension => "• Tab alterna la extensión (.xlsx / .csv)",
        T::ContinueBack => "• Enter para continuar, Esc para regresar",
        T::LabelPrompt => "Nombre en el encabezado del reporte:",
        T::LabelOptional => "• Opcional: déjalo vacío para omitirlo",
        T::ReviewSettings => "Revisar configuración:",
        T::Directory => "Directorio:",
        T::Output => "Salida:",
        T::Label => "Litigante:",
        T::Format => "Formato:",
        T::Debug => "Debug:",
        T::Enabled => "habilitado",
        T::Disabled => "deshabilitado",
        T::NoneValue => "(ninguno)",
        T::EditDirectory => "1 = Cambiar directorio",
        T::EditOutput => "2 = Cambiar nombre",
        T::EditLabel => "3 = Cambiar litigante",
        T::CycleFormat => "f/4 = Alternar formato",
        T::ToggleDebug => "d = Alternar debug",
        T::AdvancedTitle => "MODO AVANZADO - más opciones disponibles:",
        T::ExitAdvanced => "Ctrl+D = Salir del modo avanzado",
        T::EnterToStart => "⏩ Enter para empezar el procesamiento",
        T::BackHint => "b/Esc para regresar",
        T::Processing => "⏳ Procesando archivos...",
        T::ProcessingDetails => {
            "🔄 Escaneando directorio y extrayendo metadatos\n📊 Esto puede tomar tiempo para directorios grandes"
        }
        T::ProcessingSuccess => "✅ ¡Procesamiento completado exitosamente!",
        T::ProcessingFailed => "❌ Procesamiento fallido",
        T::FilesProcessed => "📋 Archivos procesados:",
        T::Multiple => "varios",
        T::SavedTo => "💾 Guardado en:",
        T::ReadyToUse => "🎉 ¡Tu índice de archivos está listo para usar!",
        T::CompanionOutput => "📋 Salida:",
        T::NotFoundTitle => "No se encontró el extractor de metadatos.",
        T::RequiredFiles => "Archivos requeridos junto a fidx o en el directorio de trabajo:",
        T::SearchedIn => "Buscado en:",
        T::InterpreterMissing => "Python no está instalado o no está en el PATH.",
        T::InstallPython => "Instala Python 3 y asegúrate de que su comando esté en el PATH.",
        T::LaunchFailed => "No se pudo iniciar el extractor de metadatos.",
        T::ExitFailed => "El extractor de metadatos reportó un error.",
        T::FinishedKeys => "r reiniciar  b reintentar  Enter/q salir",
        T::FooterQuit => "Ctrl+C salir",
        T::FooterReset => "Ctrl+R reiniciar",
        T::FooterLanguage => "Ctrl+E idioma",
        T::AdvancedBadge => "AVANZADO",
        T::FormatExcel => "Excel (.xlsx)",
        T::FormatCsv => "CSV (.csv)",
        T::FormatBoth => "Excel + CSV",
    }
}
