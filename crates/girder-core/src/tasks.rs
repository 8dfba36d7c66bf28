//! Built-in task rule records.
//!
//! Pure data: one [`ElementRule`] per task that ships with MSBuild, naming
//! the attributes (task parameters) the task accepts and which of them are
//! required. Every record starts from [`task_shell`], which contributes the
//! attributes and `Output` child rule all tasks share.
//!
//! The records here list the commonly used parameters rather than an
//! exhaustive dump of every toolchain version; tasks with open-ended
//! parameter sets are marked `allow_any_attribute`.

use crate::schema::{task_shell, AttributeRule, ElementRule};

fn attr(name: &str) -> AttributeRule {
    AttributeRule::new(name)
}

fn required(name: &str) -> AttributeRule {
    AttributeRule::new(name).required()
}

/// The built-in task table consumed by [`crate::SchemaCatalog::builtin`].
pub fn builtin_tasks() -> Vec<ElementRule> {
    vec![
        task_shell("AL")
            .attribute(attr("AlgorithmId"))
            .attribute(attr("BaseAddress"))
            .attribute(attr("CompanyName"))
            .attribute(attr("Configuration"))
            .attribute(attr("Copyright"))
            .attribute(attr("Culture"))
            .attribute(attr("DelaySign"))
            .attribute(attr("EmbedResources"))
            .attribute(attr("KeyContainer"))
            .attribute(attr("KeyFile"))
            .attribute(required("OutputAssembly"))
            .attribute(attr("Platform"))
            .attribute(attr("SourceModules"))
            .attribute(attr("TargetType"))
            .attribute(attr("ToolPath"))
            .attribute(attr("Version"))
            .attribute(attr("Win32Icon"))
            .attribute(attr("Win32Resource")),
        task_shell("AspNetCompiler")
            .attribute(attr("AllowPartiallyTrustedCallers"))
            .attribute(attr("Clean"))
            .attribute(attr("Debug"))
            .attribute(attr("DelaySign"))
            .attribute(attr("FixedNames"))
            .attribute(attr("Force"))
            .attribute(attr("KeyContainer"))
            .attribute(attr("KeyFile"))
            .attribute(attr("MetabasePath"))
            .attribute(attr("PhysicalPath"))
            .attribute(attr("TargetFrameworkMoniker"))
            .attribute(attr("TargetPath"))
            .attribute(attr("Updateable"))
            .attribute(attr("VirtualPath")),
        task_shell("AssignCulture")
            .attribute(required("Files"))
            .attribute(attr("AssignedFiles"))
            .attribute(attr("AssignedFilesWithCulture"))
            .attribute(attr("AssignedFilesWithNoCulture"))
            .attribute(attr("CultureNeutralAssignedFiles")),
        task_shell("AxImp")
            .attribute(required("ActiveXControls"))
            .attribute(attr("DelaySign"))
            .attribute(attr("GenerateSource"))
            .attribute(attr("KeyContainer"))
            .attribute(attr("KeyFile"))
            .attribute(attr("NoLogo"))
            .attribute(attr("OutputAssembly"))
            .attribute(attr("RuntimeCallableWrapperAssembly"))
            .attribute(attr("Silent"))
            .attribute(attr("Verbose")),
        task_shell("CallTarget")
            .attribute(attr("Targets"))
            .attribute(attr("RunEachTargetSeparately"))
            .attribute(attr("TargetOutputs"))
            .attribute(attr("UseResultsCache")),
        task_shell("CombinePath")
            .attribute(required("BasePath"))
            .attribute(required("Paths"))
            .attribute(attr("CombinedPaths")),
        task_shell("ConvertToAbsolutePath")
            .attribute(required("Paths"))
            .attribute(attr("AbsolutePaths")),
        task_shell("Copy")
            .attribute(required("SourceFiles"))
            .attribute(
                attr("DestinationFiles")
                    .required_unless("DestinationFolder")
                    .exclusive_with("DestinationFolder"),
            )
            .attribute(
                attr("DestinationFolder")
                    .required_unless("DestinationFiles")
                    .exclusive_with("DestinationFiles"),
            )
            .attribute(attr("OverwriteReadOnlyFiles"))
            .attribute(attr("Retries"))
            .attribute(attr("RetryDelayMilliseconds"))
            .attribute(attr("SkipUnchangedFiles"))
            .attribute(attr("UseHardlinksIfPossible"))
            .attribute(attr("UseSymboliclinksIfPossible"))
            .attribute(attr("CopiedFiles")),
        task_shell("CreateCSharpManifestResourceName")
            .attribute(required("ResourceFiles"))
            .attribute(attr("RootNamespace"))
            .attribute(attr("PrependCultureAsDirectory"))
            .attribute(attr("ManifestResourceNames"))
            .attribute(attr("ResourceFilesWithManifestResourceNames")),
        task_shell("CreateItem")
            .attribute(required("Include"))
            .attribute(attr("Exclude"))
            .attribute(attr("AdditionalMetadata"))
            .attribute(attr("PreserveExistingMetadata")),
        task_shell("CreateProperty")
            .attribute(attr("Value"))
            .attribute(attr("ValueSetByTask")),
        task_shell("CreateVisualBasicManifestResourceName")
            .attribute(required("ResourceFiles"))
            .attribute(attr("RootNamespace"))
            .attribute(attr("PrependCultureAsDirectory"))
            .attribute(attr("ManifestResourceNames"))
            .attribute(attr("ResourceFilesWithManifestResourceNames")),
        task_shell("Csc")
            .attribute(attr("AdditionalLibPaths"))
            .attribute(attr("AddModules"))
            .attribute(attr("AllowUnsafeBlocks"))
            .attribute(attr("BaseAddress"))
            .attribute(attr("CheckForOverflowUnderflow"))
            .attribute(attr("CodePage"))
            .attribute(attr("DebugType"))
            .attribute(attr("DefineConstants"))
            .attribute(attr("DelaySign"))
            .attribute(attr("DisabledWarnings"))
            .attribute(attr("DocumentationFile"))
            .attribute(attr("EmitDebugInformation"))
            .attribute(attr("ErrorReport"))
            .attribute(attr("FileAlignment"))
            .attribute(attr("KeyContainer"))
            .attribute(attr("KeyFile"))
            .attribute(attr("LangVersion"))
            .attribute(attr("MainEntryPoint"))
            .attribute(attr("ModuleAssemblyName"))
            .attribute(attr("NoConfig"))
            .attribute(attr("NoLogo"))
            .attribute(attr("NoStandardLib"))
            .attribute(attr("NoWarn"))
            .attribute(attr("Optimize"))
            .attribute(attr("OutputAssembly"))
            .attribute(attr("PdbFile"))
            .attribute(attr("Platform"))
            .attribute(attr("References"))
            .attribute(attr("Resources"))
            .attribute(attr("ResponseFiles"))
            .attribute(attr("Sources"))
            .attribute(attr("TargetType"))
            .attribute(attr("TreatWarningsAsErrors"))
            .attribute(attr("UtF8Output"))
            .attribute(attr("WarningLevel"))
            .attribute(attr("WarningsAsErrors"))
            .attribute(attr("WarningsNotAsErrors"))
            .attribute(attr("Win32Icon"))
            .attribute(attr("Win32Resource")),
        task_shell("Delete")
            .attribute(required("Files"))
            .attribute(attr("TreatErrorsAsWarnings"))
            .attribute(attr("DeletedFiles")),
        task_shell("Error")
            .attribute(attr("Text"))
            .attribute(attr("Code"))
            .attribute(attr("File"))
            .attribute(attr("HelpKeyword")),
        task_shell("Exec")
            .attribute(required("Command"))
            .attribute(attr("CustomErrorRegularExpression"))
            .attribute(attr("CustomWarningRegularExpression"))
            .attribute(attr("EchoOff"))
            .attribute(attr("ExitCode"))
            .attribute(attr("IgnoreExitCode"))
            .attribute(attr("IgnoreStandardErrorWarningFormat"))
            .attribute(attr("Outputs"))
            .attribute(attr("StdErrEncoding"))
            .attribute(attr("StdOutEncoding"))
            .attribute(attr("WorkingDirectory")),
        task_shell("FindAppConfigFile")
            .attribute(required("PrimaryList"))
            .attribute(required("SecondaryList"))
            .attribute(required("TargetPath"))
            .attribute(attr("AppConfigFile")),
        task_shell("FindInList")
            .attribute(required("ItemSpecToFind"))
            .attribute(required("List"))
            .attribute(attr("CaseSensitive"))
            .attribute(attr("FindLastMatch"))
            .attribute(attr("MatchFileNameOnly"))
            .attribute(attr("ItemFound")),
        task_shell("FindUnderPath")
            .attribute(required("Path"))
            .attribute(attr("Files"))
            .attribute(attr("UpdateToAbsolutePaths"))
            .attribute(attr("InPath"))
            .attribute(attr("OutOfPath")),
        task_shell("FormatUrl")
            .attribute(attr("InputUrl"))
            .attribute(attr("OutputUrl")),
        task_shell("FormatVersion")
            .attribute(attr("FormatType"))
            .attribute(attr("Revision"))
            .attribute(attr("Version"))
            .attribute(attr("OutputVersion")),
        task_shell("GenerateApplicationManifest")
            .attribute(attr("AssemblyName"))
            .attribute(attr("AssemblyVersion"))
            .attribute(attr("ClrVersion"))
            .attribute(attr("ConfigFile"))
            .attribute(attr("Dependencies"))
            .attribute(attr("EntryPoint"))
            .attribute(attr("HostInBrowser"))
            .attribute(attr("IconFile"))
            .attribute(attr("InputManifest"))
            .attribute(attr("OsVersion"))
            .attribute(attr("OutputManifest"))
            .attribute(attr("Platform"))
            .attribute(attr("TargetFrameworkMoniker"))
            .attribute(attr("TrustInfoFile")),
        task_shell("GenerateResource")
            .attribute(required("Sources"))
            .attribute(attr("AdditionalInputs"))
            .attribute(attr("ExcludedInputPaths"))
            .attribute(attr("ExecuteAsTool"))
            .attribute(attr("NeverLockTypeAssemblies"))
            .attribute(attr("OutputResources"))
            .attribute(attr("PublicClass"))
            .attribute(attr("References"))
            .attribute(attr("SdkToolsPath"))
            .attribute(attr("StateFile"))
            .attribute(attr("StronglyTypedClassName"))
            .attribute(attr("StronglyTypedFileName"))
            .attribute(attr("StronglyTypedLanguage"))
            .attribute(attr("StronglyTypedManifestPrefix"))
            .attribute(attr("StronglyTypedNamespace"))
            .attribute(attr("UseSourcePath")),
        task_shell("GetAssemblyIdentity")
            .attribute(required("AssemblyFiles"))
            .attribute(attr("Assemblies")),
        task_shell("GetFrameworkPath")
            .attribute(attr("Path"))
            .attribute(attr("FrameworkVersion11Path"))
            .attribute(attr("FrameworkVersion20Path"))
            .attribute(attr("FrameworkVersion30Path"))
            .attribute(attr("FrameworkVersion35Path"))
            .attribute(attr("FrameworkVersion40Path")),
        task_shell("GetFrameworkSdkPath")
            .attribute(attr("Path"))
            .attribute(attr("FrameworkSdkVersion20Path"))
            .attribute(attr("FrameworkSdkVersion35Path"))
            .attribute(attr("FrameworkSdkVersion40Path")),
        task_shell("GetReferenceAssemblyPaths")
            .attribute(attr("TargetFrameworkMoniker"))
            .attribute(attr("RootPath"))
            .attribute(attr("BypassFrameworkInstallChecks"))
            .attribute(attr("ReferenceAssemblyPaths"))
            .attribute(attr("FullFrameworkReferenceAssemblyPaths"))
            .attribute(attr("TargetFrameworkMonikerDisplayName")),
        task_shell("LC")
            .attribute(required("Sources"))
            .attribute(required("LicenseTarget"))
            .attribute(attr("NoLogo"))
            .attribute(attr("OutputDirectory"))
            .attribute(attr("OutputLicense"))
            .attribute(attr("ReferencedAssemblies"))
            .attribute(attr("SdkToolsPath"))
            .attribute(attr("ToolPath")),
        task_shell("MakeDir")
            .attribute(required("Directories"))
            .attribute(attr("DirectoriesCreated")),
        task_shell("Message")
            .attribute(attr("Text"))
            .attribute(attr("Importance")),
        task_shell("Move")
            .attribute(required("SourceFiles"))
            .attribute(
                attr("DestinationFiles")
                    .required_unless("DestinationFolder")
                    .exclusive_with("DestinationFolder"),
            )
            .attribute(
                attr("DestinationFolder")
                    .required_unless("DestinationFiles")
                    .exclusive_with("DestinationFiles"),
            )
            .attribute(attr("OverwriteReadOnlyFiles"))
            .attribute(attr("MovedFiles")),
        task_shell("MSBuild")
            .attribute(required("Projects"))
            .attribute(attr("BuildInParallel"))
            .attribute(attr("Properties"))
            .attribute(attr("RebaseOutputs"))
            .attribute(attr("RemoveProperties"))
            .attribute(attr("RunEachTargetSeparately"))
            .attribute(attr("SkipNonexistentProjects"))
            .attribute(attr("StopOnFirstFailure"))
            .attribute(attr("TargetAndPropertyListSeparators"))
            .attribute(attr("TargetOutputs"))
            .attribute(attr("Targets"))
            .attribute(attr("ToolsVersion"))
            .attribute(attr("UnloadProjectsOnCompletion"))
            .attribute(attr("UseResultsCache")),
        task_shell("ReadLinesFromFile")
            .attribute(required("File"))
            .attribute(attr("Lines")),
        task_shell("RegisterAssembly")
            .attribute(required("Assemblies"))
            .attribute(attr("AssemblyListFile"))
            .attribute(attr("CreateCodeBase"))
            .attribute(attr("TypeLibFiles")),
        task_shell("RemoveDir")
            .attribute(required("Directories"))
            .attribute(attr("RemovedDirectories")),
        task_shell("RemoveDuplicates")
            .attribute(attr("Inputs"))
            .attribute(attr("Filtered")),
        task_shell("ResolveAssemblyReference")
            .attribute(required("Assemblies"))
            .attribute(attr("AllowedAssemblyExtensions"))
            .attribute(attr("AllowedRelatedFileExtensions"))
            .attribute(attr("AppConfigFile"))
            .attribute(attr("AssemblyFiles"))
            .attribute(attr("AutoUnify"))
            .attribute(attr("CandidateAssemblyFiles"))
            .attribute(attr("FindDependencies"))
            .attribute(attr("FindRelatedFiles"))
            .attribute(attr("FindSatellites"))
            .attribute(attr("FindSerializationAssemblies"))
            .attribute(attr("FullFrameworkFolders"))
            .attribute(attr("IgnoreDefaultInstalledAssemblyTables"))
            .attribute(attr("InstalledAssemblyTables"))
            .attribute(attr("SearchPaths"))
            .attribute(attr("Silent"))
            .attribute(attr("StateFile"))
            .attribute(attr("TargetFrameworkDirectories"))
            .attribute(attr("TargetFrameworkMoniker"))
            .attribute(attr("TargetProcessorArchitecture"))
            .attribute(attr("ResolvedFiles"))
            .attribute(attr("ResolvedDependencyFiles"))
            .attribute(attr("SuggestedRedirects")),
        task_shell("ResolveKeySource")
            .attribute(attr("CertificateFile"))
            .attribute(attr("CertificateThumbprint"))
            .attribute(attr("KeyFile"))
            .attribute(attr("ResolvedKeyContainer"))
            .attribute(attr("ResolvedKeyFile"))
            .attribute(attr("ResolvedThumbprint"))
            .attribute(attr("ShowImportDialogDespitePreviousFailures"))
            .attribute(attr("SuppressAutoClosePasswordPrompt")),
        task_shell("SGen")
            .attribute(required("BuildAssemblyName"))
            .attribute(required("BuildAssemblyPath"))
            .attribute(required("ShouldGenerateSerializer"))
            .attribute(required("UseProxyTypes"))
            .attribute(attr("DelaySign"))
            .attribute(attr("KeyContainer"))
            .attribute(attr("KeyFile"))
            .attribute(attr("Platform"))
            .attribute(attr("References"))
            .attribute(attr("SdkToolsPath"))
            .attribute(attr("SerializationAssembly"))
            .attribute(attr("Types")),
        task_shell("SignFile")
            .attribute(required("CertificateThumbprint"))
            .attribute(required("SigningTarget"))
            .attribute(attr("TimestampUrl"))
            .attribute(attr("TargetFrameworkVersion")),
        task_shell("Touch")
            .attribute(required("Files"))
            .attribute(attr("AlwaysCreate"))
            .attribute(attr("ForceTouch"))
            .attribute(attr("Time"))
            .attribute(attr("TouchedFiles")),
        task_shell("UnregisterAssembly")
            .attribute(attr("Assemblies"))
            .attribute(attr("AssemblyListFile"))
            .attribute(attr("TypeLibFiles")),
        task_shell("UpdateManifest")
            .attribute(required("ApplicationManifest"))
            .attribute(required("ApplicationPath"))
            .attribute(required("InputManifest"))
            .attribute(attr("OutputManifest")),
        task_shell("Vbc")
            .attribute(attr("AdditionalLibPaths"))
            .attribute(attr("AddModules"))
            .attribute(attr("BaseAddress"))
            .attribute(attr("CodePage"))
            .attribute(attr("DebugType"))
            .attribute(attr("DefineConstants"))
            .attribute(attr("DelaySign"))
            .attribute(attr("DisabledWarnings"))
            .attribute(attr("DocumentationFile"))
            .attribute(attr("EmitDebugInformation"))
            .attribute(attr("ErrorReport"))
            .attribute(attr("FileAlignment"))
            .attribute(attr("Imports"))
            .attribute(attr("KeyContainer"))
            .attribute(attr("KeyFile"))
            .attribute(attr("LangVersion"))
            .attribute(attr("MainEntryPoint"))
            .attribute(attr("NoConfig"))
            .attribute(attr("NoLogo"))
            .attribute(attr("NoStandardLib"))
            .attribute(attr("NoWarnings"))
            .attribute(attr("Optimize"))
            .attribute(attr("OptionCompare"))
            .attribute(attr("OptionExplicit"))
            .attribute(attr("OptionInfer"))
            .attribute(attr("OptionStrict"))
            .attribute(attr("OutputAssembly"))
            .attribute(attr("Platform"))
            .attribute(attr("References"))
            .attribute(attr("Resources"))
            .attribute(attr("ResponseFiles"))
            .attribute(attr("RootNamespace"))
            .attribute(attr("SdkPath"))
            .attribute(attr("Sources"))
            .attribute(attr("TargetType"))
            .attribute(attr("TreatWarningsAsErrors"))
            .attribute(attr("Verbosity"))
            .attribute(attr("WarningLevel"))
            .attribute(attr("WarningsAsErrors"))
            .attribute(attr("WarningsNotAsErrors"))
            .attribute(attr("Win32Icon"))
            .attribute(attr("Win32Resource")),
        task_shell("WriteCodeFragment")
            .attribute(required("Language"))
            .attribute(attr("AssemblyAttributes"))
            .attribute(attr("OutputDirectory"))
            .attribute(attr("OutputFile")),
        task_shell("WriteLinesToFile")
            .attribute(required("File"))
            .attribute(attr("Lines"))
            .attribute(attr("Overwrite"))
            .attribute(attr("Encoding"))
            .attribute(attr("WriteOnlyWhenDifferent")),
        task_shell("XmlPeek")
            .attribute(attr("Namespaces"))
            .attribute(attr("Query"))
            .attribute(attr("XmlContent"))
            .attribute(attr("XmlInputPath"))
            .attribute(attr("Result")),
        task_shell("XmlPoke")
            .attribute(attr("Namespaces"))
            .attribute(attr("Query"))
            .attribute(attr("Value"))
            .attribute(attr("XmlInputPath")),
        task_shell("XslTransformation")
            .attribute(required("OutputPaths"))
            .attribute(attr("Parameters"))
            .attribute(attr("XmlContent"))
            .attribute(attr("XmlInputPaths"))
            .attribute(attr("XslCompiledDllPath"))
            .attribute(attr("XslContent"))
            .attribute(attr("XslInputPath")),
    ]
}
